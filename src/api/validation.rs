use super::ApiError;

pub fn validate_record_id(id: u64) -> Result<u64, ApiError> {
    if id == 0 {
        return Err(ApiError::validation(
            "Invalid ID: 0. ID must be a positive integer",
        ));
    }
    Ok(id)
}

/// Bulk generation overwrites all personnel and must be confirmed explicitly.
pub fn validate_seed_confirmation(confirm: bool) -> Result<(), ApiError> {
    if !confirm {
        return Err(ApiError::validation(
            "Generating sample personnel replaces all existing personnel. Send {\"confirm\": true} to proceed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id(1).is_ok());
        assert!(validate_record_id(77).is_ok());
        assert!(validate_record_id(0).is_err());
    }

    #[test]
    fn test_validate_seed_confirmation() {
        assert!(validate_seed_confirmation(true).is_ok());
        assert!(validate_seed_confirmation(false).is_err());
    }
}
