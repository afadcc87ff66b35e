use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DragDropError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("script error: {0}")]
    Script(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("auto_scroll_step = -1 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: auto_scroll_step = -1 is out of range"
        );
    }

    #[test]
    fn drag_drop_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: DragDropError = config_err.into();
        assert!(matches!(err, DragDropError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn drag_drop_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "script missing");
        let err: DragDropError = io_err.into();
        assert!(matches!(err, DragDropError::Io(_)));
        assert!(err.to_string().contains("script missing"));
    }

    #[test]
    fn drag_drop_error_script() {
        assert_eq!(
            DragDropError::Script("no item named c".into()).to_string(),
            "script error: no item named c"
        );
    }
}
