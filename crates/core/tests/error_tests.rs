// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use barbell_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_input() {
        let err = CoreError::InvalidInput("Portfolio has no holdings".into());
        assert_eq!(err.to_string(), "Invalid input: Portfolio has no holdings");
    }

    #[test]
    fn invalid_input_empty_message() {
        let err = CoreError::InvalidInput(String::new());
        assert_eq!(err.to_string(), "Invalid input: ");
    }

    #[test]
    fn undefined_arithmetic() {
        let err = CoreError::UndefinedArithmetic {
            field: "middle".into(),
        };
        assert_eq!(
            err.to_string(),
            "Undefined arithmetic for middle: baseline is zero"
        );
    }

    #[test]
    fn data_inconsistency() {
        let err = CoreError::DataInconsistency("mover X flagged up".into());
        assert_eq!(err.to_string(), "Data inconsistency: mover X flagged up");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn csv() {
        let err = CoreError::Csv("unequal lengths".into());
        assert_eq!(err.to_string(), "CSV error: unequal lengths");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("no such file")),
            other => panic!("Expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io_error() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}

// ── Trait behaviour ─────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::InvalidInput("x".into()));
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn debug_contains_variant_name() {
        let err = CoreError::UndefinedArithmetic {
            field: "cash".into(),
        };
        let debug = format!("{err:?}");
        assert!(debug.contains("UndefinedArithmetic"));
        assert!(debug.contains("cash"));
    }
}
