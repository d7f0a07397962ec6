use std::time::SystemTime;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter: String,
    /// Index into [`Poll::options`]
    pub option: usize,
    pub cast_at: SystemTime,
}

impl Vote {
    /// Parses the `<option>` argument of `!vote`. Range is checked against the poll later.
    pub fn parse_option(arg: Option<&str>) -> Result<usize, ValidationError> {
        let index = arg
            .and_then(|arg| arg.trim().parse::<i64>().ok())
            .ok_or(ValidationError::OptionNotNumeric)?;
        usize::try_from(index).map_err(|_| ValidationError::OptionOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_must_be_a_number() {
        assert_eq!(Vote::parse_option(Some("2")), Ok(2));
        assert_eq!(Vote::parse_option(Some(" 0 ")), Ok(0));
        assert_eq!(
            Vote::parse_option(Some("two")),
            Err(ValidationError::OptionNotNumeric)
        );
        assert_eq!(Vote::parse_option(None), Err(ValidationError::OptionNotNumeric));
    }

    #[test]
    fn negative_option_is_out_of_range() {
        assert_eq!(
            Vote::parse_option(Some("-1")),
            Err(ValidationError::OptionOutOfRange)
        );
    }
}
