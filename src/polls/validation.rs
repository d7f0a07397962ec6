use std::collections::HashSet;

use super::*;

/// A check paired with the error reported when it does not hold.
pub struct Rule<T> {
    pub holds: fn(&T) -> bool,
    pub error: ValidationError,
}

/// Returns the first rule, in order, that `value` violates.
pub fn violated_rule<'r, T>(rules: &'r [Rule<T>], value: &T) -> Option<&'r Rule<T>> {
    rules.iter().find(|rule| !(rule.holds)(value))
}

pub fn validate<T>(rules: &[Rule<T>], value: &T) -> Result<(), ValidationError> {
    match violated_rule(rules, value) {
        Some(rule) => Err(rule.error.clone()),
        None => Ok(()),
    }
}

/// Arguments of a poll creation request before validation.
#[derive(Debug, Clone, Default)]
pub struct PollDraft {
    pub target: String,
    pub creator: String,
    pub description: String,
    pub options: Vec<String>,
    /// Raw `<length>` argument in minutes
    pub length: Option<String>,
}

impl PollDraft {
    fn parsed_length(&self) -> Option<i64> {
        self.length
            .as_deref()
            .and_then(|length| length.trim().parse().ok())
    }

    /// Poll length in minutes, falling back to [`DEFAULT_POLL_LENGTH`].
    pub fn length_minutes(&self) -> u64 {
        self.parsed_length()
            .and_then(|length| u64::try_from(length).ok())
            .unwrap_or(DEFAULT_POLL_LENGTH)
    }
}

pub const POLL_RULES: &[Rule<PollDraft>] = &[
    Rule {
        holds: |draft| !draft.target.trim().is_empty(),
        error: ValidationError::InvalidTarget,
    },
    Rule {
        holds: |draft| !draft.creator.trim().is_empty(),
        error: ValidationError::InvalidUser,
    },
    Rule {
        holds: |draft| !draft.description.trim().is_empty(),
        error: ValidationError::EmptyDescription,
    },
    Rule {
        holds: |draft| draft.options.len() >= MIN_POLL_OPTIONS,
        error: ValidationError::TooFewOptions,
    },
    Rule {
        holds: |draft| draft.options.iter().all(|option| !option.trim().is_empty()),
        error: ValidationError::EmptyOption,
    },
    Rule {
        holds: |draft| {
            let unique: HashSet<&str> = draft.options.iter().map(|option| option.trim()).collect();
            unique.len() == draft.options.len()
        },
        error: ValidationError::DuplicateOption,
    },
    Rule {
        holds: |draft| draft.length.is_none() || draft.parsed_length().is_some(),
        error: ValidationError::LengthNotNumeric,
    },
    Rule {
        holds: |draft| {
            draft
                .parsed_length()
                .map_or(true, |length| length >= MIN_POLL_LENGTH as i64)
        },
        error: ValidationError::LengthTooShort,
    },
    Rule {
        holds: |draft| {
            draft
                .parsed_length()
                .map_or(true, |length| length <= MAX_POLL_LENGTH as i64)
        },
        error: ValidationError::LengthTooLong,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PollDraft {
        PollDraft {
            target: "snaarf".to_owned(),
            creator: "42".to_owned(),
            description: "Next game?".to_owned(),
            options: vec!["Celeste".to_owned(), "Hades".to_owned()],
            length: Some("60".to_owned()),
        }
    }

    fn violation(draft: &PollDraft) -> Option<ValidationError> {
        violated_rule(POLL_RULES, draft).map(|rule| rule.error.clone())
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(validate(POLL_RULES, &draft()), Ok(()));
        let no_length = PollDraft {
            length: None,
            ..draft()
        };
        assert_eq!(validate(POLL_RULES, &no_length), Ok(()));
        assert_eq!(no_length.length_minutes(), DEFAULT_POLL_LENGTH);
    }

    #[test]
    fn missing_identities_are_rejected() {
        let draft_target = PollDraft {
            target: String::new(),
            ..draft()
        };
        assert_eq!(violation(&draft_target), Some(ValidationError::InvalidTarget));
        let draft_creator = PollDraft {
            creator: " ".to_owned(),
            ..draft()
        };
        assert_eq!(
            validate(POLL_RULES, &draft_creator),
            Err(ValidationError::InvalidUser)
        );
    }

    #[test]
    fn description_must_not_be_blank() {
        let blank = PollDraft {
            description: "   ".to_owned(),
            ..draft()
        };
        assert_eq!(
            validate(POLL_RULES, &blank),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn options_need_two_distinct_entries() {
        let single = PollDraft {
            options: vec!["Celeste".to_owned()],
            ..draft()
        };
        assert_eq!(validate(POLL_RULES, &single), Err(ValidationError::TooFewOptions));

        let empty = PollDraft {
            options: vec!["Celeste".to_owned(), "".to_owned()],
            ..draft()
        };
        assert_eq!(validate(POLL_RULES, &empty), Err(ValidationError::EmptyOption));

        let repeated = PollDraft {
            options: vec!["Celeste".to_owned(), "Celeste".to_owned()],
            ..draft()
        };
        assert_eq!(violation(&repeated), Some(ValidationError::DuplicateOption));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        for (length, expected) in [
            ("abc", Err(ValidationError::LengthNotNumeric)),
            ("9", Err(ValidationError::LengthTooShort)),
            ("-20", Err(ValidationError::LengthTooShort)),
            ("10", Ok(())),
            ("1440", Ok(())),
            ("1441", Err(ValidationError::LengthTooLong)),
        ] {
            let draft = PollDraft {
                length: Some(length.to_owned()),
                ..draft()
            };
            assert_eq!(validate(POLL_RULES, &draft), expected, "length {length}");
        }
    }

    #[test]
    fn first_violation_wins() {
        let broken = PollDraft {
            description: String::new(),
            options: vec![],
            length: Some("nope".to_owned()),
            ..draft()
        };
        assert_eq!(violation(&broken), Some(ValidationError::EmptyDescription));
    }
}
