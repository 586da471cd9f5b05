use qanda_core::error::StoreError;
use qanda_core::models::Vote;

/// Convert a stored `karma.vote` value into a [`Vote`].
pub fn vote_from_column(value: i16) -> Result<Vote, StoreError> {
    Vote::try_from(i32::from(value))
        .map_err(|_| StoreError::MalformedRow(format!("karma.vote must be 1 or -1, got {value}")))
}

/// The column value for a [`Vote`].
pub fn vote_to_column(vote: Vote) -> i16 {
    match vote {
        Vote::Up => 1,
        Vote::Down => -1,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unit_values_convert() {
        assert_eq!(vote_from_column(1).unwrap(), Vote::Up);
        assert_eq!(vote_from_column(-1).unwrap(), Vote::Down);
        assert_eq!(vote_to_column(Vote::Down), -1);
    }

    #[test]
    fn other_values_are_malformed() {
        assert_matches!(vote_from_column(0), Err(StoreError::MalformedRow(_)));
        assert_matches!(vote_from_column(5), Err(StoreError::MalformedRow(_)));
    }
}
