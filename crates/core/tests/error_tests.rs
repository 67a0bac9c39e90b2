// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError display & conversions
// ═══════════════════════════════════════════════════════════════════

use expense_tracker_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn fetch_failed() {
        let e = CoreError::FetchFailed("disk unavailable".into());
        assert_eq!(
            e.to_string(),
            "Failed to fetch expenses from the store: disk unavailable"
        );
    }

    #[test]
    fn save_failed() {
        let e = CoreError::SaveFailed("disk full".into());
        assert_eq!(e.to_string(), "Failed to save to the store: disk full");
    }

    #[test]
    fn invalid_url() {
        let e = CoreError::InvalidUrl("ftp://example".into());
        assert_eq!(e.to_string(), "Invalid remote URL: ftp://example");
    }

    #[test]
    fn decryption_has_fixed_message() {
        assert_eq!(
            CoreError::Decryption.to_string(),
            "Decryption failed — wrong password or corrupted file"
        );
    }

    #[test]
    fn unsupported_version_carries_number() {
        assert!(CoreError::UnsupportedVersion(7).to_string().contains('7'));
    }
}

mod conversions {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(CoreError::from(io), CoreError::FileIO(_)));
    }

    #[test]
    fn serde_json_error_becomes_decoding() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        assert!(matches!(CoreError::from(json_err), CoreError::Decoding(_)));
    }

    #[test]
    fn bincode_error_becomes_serialization() {
        let bin_err = bincode::deserialize::<String>(&[]).unwrap_err();
        assert!(matches!(
            CoreError::from(bin_err),
            CoreError::Serialization(_)
        ));
    }

    #[test]
    fn aes_error_becomes_decryption() {
        assert!(matches!(
            CoreError::from(aes_gcm::Error),
            CoreError::Decryption
        ));
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::Decryption);
    }
}
