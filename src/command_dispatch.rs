//! Purpose: Hold top-level CLI command dispatch for `dyndoc`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every command writes at most one JSON document or value to stdout.
//! Invariants: Accessor failures surface as typed errors, never as partial output.

use super::*;

use dyndoc::api::{Document, JsonType, codec};
use dyndoc::sample;
use serde_json::Number;

pub(super) fn dispatch_command(command: Command) -> Result<(), Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "dyndoc", &mut io::stdout());
            Ok(())
        }
        Command::Sample { pretty } => {
            let document = sample::person();
            let text = if pretty {
                document.to_json_pretty()?
            } else {
                document.to_json()?
            };
            println!("{text}");
            Ok(())
        }
        Command::Fmt { file, pretty } => {
            let document = read_document(file.as_deref())?;
            let text = if pretty {
                document.to_json_pretty()?
            } else {
                document.to_json()?
            };
            println!("{text}");
            Ok(())
        }
        Command::Get {
            key,
            file,
            access,
            default,
        } => {
            let document = read_document(file.as_deref())?;
            let default = parse_default(default.as_deref())?;
            let value = access_value(&document, &key, access, default)?;
            emit_json(&value);
            Ok(())
        }
        Command::Serve {
            bind,
            allow_non_loopback,
        } => {
            let config = serve::ServeConfig {
                bind: parse_bind(&bind)?,
                allow_non_loopback,
            };
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to start runtime")
                        .with_source(err)
                })?;
            runtime.block_on(serve::serve(config))
        }
    }
}

fn read_document(file: Option<&Path>) -> Result<Document, Error> {
    let (text, source) = read_input(file)?;
    codec::parse_with_context(&text, &source).map(Document::from_map)
}

fn access_value(
    document: &Document,
    key: &str,
    access: AccessKind,
    default: Option<Value>,
) -> Result<Value, Error> {
    let value = match access {
        AccessKind::Raw => match default {
            Some(default) => document.get_or(key, default)?,
            None => document.get(key).cloned().unwrap_or(Value::Null),
        },
        AccessKind::String => match default {
            Some(default) => Value::from(document.get_string_or(key, default_as::<String>(default)?)),
            None => document.get_string(key).map_or(Value::Null, Value::from),
        },
        AccessKind::Int => match default {
            Some(default) => Value::from(document.get_i32_or(key, default_as(default)?)?),
            None => document.get_i32(key)?.map_or(Value::Null, Value::from),
        },
        AccessKind::Long => match default {
            Some(default) => Value::from(document.get_i64_or(key, default_as(default)?)?),
            None => document.get_i64(key)?.map_or(Value::Null, Value::from),
        },
        AccessKind::Double => {
            let double = match default {
                Some(default) => Some(document.get_f64_or(key, default_as(default)?)?),
                None => document.get_f64(key)?,
            };
            // Non-finite floats have no JSON number form.
            double.map_or(Value::Null, |double| {
                Number::from_f64(double).map_or_else(|| Value::from(double.to_string()), Value::Number)
            })
        }
        AccessKind::Decimal => match default {
            Some(default) => Value::Number(document.get_decimal_or(key, default_as(default)?)?),
            None => document.get_decimal(key)?.map_or(Value::Null, Value::Number),
        },
        AccessKind::Bool => match default {
            Some(default) => Value::Bool(document.get_bool_or(key, default_as(default)?)?),
            None => document.get_bool(key)?.map_or(Value::Null, Value::Bool),
        },
        AccessKind::List => match default {
            Some(default) => Value::Array(document.get_list_value_or(key, default)?),
            None => document
                .get_list::<Value>(key)?
                .map_or(Value::Null, Value::Array),
        },
        AccessKind::Object => match document.get_object::<Document>(key)? {
            Some(object) => Value::from(object),
            None => match default {
                Some(default) => Value::from(Document::try_from(default)?),
                None => Value::Null,
            },
        },
    };
    Ok(value)
}

fn default_as<T: JsonType>(default: Value) -> Result<T, Error> {
    T::from_json(&default).ok_or_else(|| {
        Error::new(ErrorKind::Usage)
            .with_message(format!(
                "--default must be a JSON {}, got {}",
                T::NAME,
                dyndoc::api::value_type_name(&default)
            ))
            .with_hint("Pass a default matching the --as accessor.")
    })
}
