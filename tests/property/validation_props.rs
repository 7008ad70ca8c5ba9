//! Input validation properties

use proptest::prelude::*;
use studentnest::backend::auth::handlers::types::is_valid_username;
use studentnest::shared::messaging::message::{preview, validate_content, MAX_MESSAGE_LEN};
use studentnest::shared::review::CreateReviewRequest;

proptest! {
    #[test]
    fn well_formed_usernames_are_accepted(name in "[a-zA-Z][a-zA-Z0-9_]{2,29}") {
        prop_assert!(is_valid_username(&name));
    }

    #[test]
    fn usernames_starting_with_non_letter_are_rejected(name in "[0-9_][a-zA-Z0-9_]{2,29}") {
        prop_assert!(!is_valid_username(&name));
    }

    #[test]
    fn usernames_with_other_characters_are_rejected(
        head in "[a-z]{2,10}",
        bad in "[-. @!#]",
        tail in "[a-z]{0,10}",
    ) {
        let name = format!("{}{}{}", head, bad, tail);
        prop_assert!(!is_valid_username(&name));
    }

    #[test]
    fn preview_never_exceeds_limit(content in "\\PC{0,300}", max_len in 3usize..200) {
        let shortened = preview(&content, max_len);
        prop_assert!(shortened.chars().count() <= max_len);
        if content.chars().count() <= max_len {
            prop_assert_eq!(shortened, content);
        } else {
            prop_assert!(shortened.ends_with("..."));
        }
    }

    #[test]
    fn whitespace_only_messages_are_rejected(content in "[ \t\n]{0,50}") {
        prop_assert!(validate_content(&content).is_err());
    }

    #[test]
    fn messages_within_limit_are_accepted(content in "[a-z][a-z ]{0,500}") {
        prop_assert!(content.chars().count() <= MAX_MESSAGE_LEN);
        prop_assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected(rating in prop_oneof![i64::MIN..1i64, 6i64..i64::MAX]) {
        let request = CreateReviewRequest { rating, comment: String::new() };
        prop_assert!(request.validate().is_err());
    }

    #[test]
    fn ratings_one_to_five_are_accepted(rating in 1i64..=5) {
        let request = CreateReviewRequest { rating, comment: "fine".to_string() };
        prop_assert!(request.validate().is_ok());
    }
}
