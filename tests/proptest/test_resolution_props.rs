//! Property-based tests for option resolution

use easyterm::config::{resolve_command, resolve_environment};
use easyterm::Palette;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_resolve_command_doesnt_panic(s in "\\PC*") {
        let _ = resolve_command(&s);
    }

    #[test]
    fn test_resolve_command_never_empty(s in "\\PC*") {
        if let Ok(argv) = resolve_command(&s) {
            prop_assert!(!argv.is_empty());
        }
    }

    #[test]
    fn test_plain_words_split_unchanged(words in prop::collection::vec("[a-zA-Z0-9_./-]{1,12}", 1..6)) {
        let argv = resolve_command(&words.join(" ")).unwrap();
        prop_assert_eq!(argv, words);
    }

    #[test]
    fn test_environment_entries_have_no_spaces(s in "[A-Z=0-9 ]{0,40}") {
        let entries = resolve_environment(&s);
        prop_assert!(entries.iter().all(|e| !e.is_empty() && !e.contains(' ')));
        prop_assert_eq!(entries.join(""), s.replace(' ', ""));
    }

    #[test]
    fn test_palette_parse_doesnt_panic(s in "\\PC*") {
        let _ = Palette::parse(&s);
    }

    #[test]
    fn test_hex_palettes_round_trip(bg in any::<[u8; 3]>(), fg in any::<[u8; 3]>()) {
        let value = format!(
            "#{:02x}{:02x}{:02x} #{:02X}{:02X}{:02X}",
            bg[0], bg[1], bg[2], fg[0], fg[1], fg[2]
        );
        let palette = Palette::parse(&value).unwrap().unwrap();
        prop_assert_eq!(palette.background.to_array(), [bg[0], bg[1], bg[2], 255]);
        prop_assert_eq!(palette.foreground.to_array(), [fg[0], fg[1], fg[2], 255]);
    }

    #[test]
    fn test_single_token_palette_is_none(token in "[a-z#0-9]{0,10}") {
        prop_assert_eq!(Palette::parse(&token).unwrap_or(None), None);
    }
}
