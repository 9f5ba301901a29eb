// src/config/validate.rs

use crate::config::model::{Manifest, RawManifest};
use crate::errors::{Result, XjfxError};

impl TryFrom<RawManifest> for Manifest {
    type Error = XjfxError;

    fn try_from(raw: RawManifest) -> std::result::Result<Self, Self::Error> {
        validate_raw_manifest(&raw)?;
        Ok(Manifest::new_unchecked(raw.config, raw.command))
    }
}

fn validate_raw_manifest(raw: &RawManifest) -> Result<()> {
    ensure_has_commands(raw)?;
    validate_global_config(raw)?;
    validate_commands(raw)?;
    Ok(())
}

fn ensure_has_commands(raw: &RawManifest) -> Result<()> {
    if raw.command.is_empty() {
        return Err(XjfxError::ConfigError(
            "manifest must contain at least one [[command]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(raw: &RawManifest) -> Result<()> {
    // capture is strongly typed and validated during deserialization.
    if let Some(n) = raw.config.max_workers {
        if n < 0 {
            return Err(XjfxError::ConfigError(format!(
                "[config].max_workers must be >= 0 (got {n})"
            )));
        }
    }
    Ok(())
}

fn validate_commands(raw: &RawManifest) -> Result<()> {
    for (index, entry) in raw.command.iter().enumerate() {
        match entry.args.first() {
            None => {
                return Err(XjfxError::ConfigError(format!(
                    "command #{index} has empty `args`; the first element must be the program"
                )));
            }
            Some(program) if program.is_empty() => {
                return Err(XjfxError::ConfigError(format!(
                    "command #{index} has an empty program name"
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> std::result::Result<Manifest, XjfxError> {
        let raw: RawManifest = toml::from_str(s).expect("valid TOML");
        Manifest::try_from(raw)
    }

    #[test]
    fn defaults_fill_missing_config() {
        let m = parse(
            r#"
[[command]]
args = ["echo", "hi"]
"#,
        )
        .unwrap();
        assert_eq!(m.config.max_workers, None);
        assert!(m.config.decode_output);
        assert!(!m.config.ignore_retcode);
        assert_eq!(m.command.len(), 1);
    }

    #[test]
    fn empty_manifest_is_rejected() {
        match parse("[config]\nmax_workers = 2\n") {
            Err(XjfxError::ConfigError(msg)) => assert!(msg.contains("at least one")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn negative_workers_are_rejected() {
        let res = parse(
            r#"
[config]
max_workers = -1

[[command]]
args = ["true"]
"#,
        );
        assert!(matches!(res, Err(XjfxError::ConfigError(msg)) if msg.contains("max_workers")));
    }

    #[test]
    fn empty_args_are_rejected() {
        let res = parse("[[command]]\nargs = []\n");
        assert!(matches!(res, Err(XjfxError::ConfigError(msg)) if msg.contains("#0")));
    }
}
