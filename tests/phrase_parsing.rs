use vim_core::registry;
use vim_core::{CommandFlags, CommandKind, Phrase, PhraseParser, PhraseStatus};

fn success(count: u32, key: char, modifier: Option<char>) -> PhraseStatus {
    PhraseStatus::Success(Phrase {
        count,
        key,
        modifier,
    })
}

#[test]
fn test_single_key_commands() {
    assert_eq!(PhraseParser::parse("x", false), success(0, 'x', None));
    assert_eq!(PhraseParser::parse("j", false), success(0, 'j', None));
    assert_eq!(PhraseParser::parse("G", false), success(0, 'G', None));
}

#[test]
fn test_count_prefix() {
    assert_eq!(PhraseParser::parse("3j", false), success(3, 'j', None));
    assert_eq!(PhraseParser::parse("10x", false), success(10, 'x', None));
}

#[test]
fn test_bare_count_needs_more() {
    assert_eq!(PhraseParser::parse("5", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("12", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("", false), PhraseStatus::NeedMore);
}

#[test]
fn test_zero_alone_is_a_motion() {
    assert_eq!(PhraseParser::parse("0", false), success(0, '0', None));
}

#[test]
fn test_operator_waits_for_motion() {
    assert_eq!(PhraseParser::parse("d", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("2d", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("d2", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("dw", false), success(0, 'd', Some('w')));
}

#[test]
fn test_count_on_either_side_of_operator() {
    assert_eq!(PhraseParser::parse("2dw", false), success(2, 'd', Some('w')));
    assert_eq!(PhraseParser::parse("d2w", false), success(2, 'd', Some('w')));
    assert_eq!(PhraseParser::parse("3dd", false), success(3, 'd', Some('d')));
}

#[test]
fn test_selection_supplies_operator_range() {
    assert_eq!(PhraseParser::parse("d", true), success(0, 'd', None));
    assert_eq!(PhraseParser::parse("y", true), success(0, 'y', None));
    assert_eq!(PhraseParser::parse("c", true), success(0, 'c', None));
}

#[test]
fn test_non_visual_modifier_commands_still_wait() {
    assert_eq!(PhraseParser::parse("g", true), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("r", true), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("z", false), PhraseStatus::NeedMore);
    assert_eq!(PhraseParser::parse("gg", false), success(0, 'g', Some('g')));
    assert_eq!(PhraseParser::parse("rx", false), success(0, 'r', Some('x')));
}

#[test]
fn test_unknown_key_fails() {
    assert_eq!(PhraseParser::parse("Q", false), PhraseStatus::Failed);
    assert_eq!(PhraseParser::parse("3Q", false), PhraseStatus::Failed);
    assert_eq!(PhraseParser::parse("é", false), PhraseStatus::Failed);
}

#[test]
fn test_huge_count_saturates() {
    assert_eq!(
        PhraseParser::parse("99999999999j", false),
        success(u32::MAX, 'j', None)
    );
}

#[test]
fn test_registry_lookup() {
    let delete = registry::lookup('d').expect("d is registered");
    assert_eq!(delete.kind, CommandKind::Change);
    assert!(delete.requires_modifier());
    assert!(delete.is_visual());

    let word = registry::lookup('w').expect("w is registered");
    assert_eq!(word.kind, CommandKind::Movement);
    assert!(word.flags.contains(CommandFlags::MOTION_EXCLUSIVE));

    let down = registry::lookup('j').expect("j is registered");
    assert!(down.flags.contains(CommandFlags::MOTION_LINEWISE));

    assert!(registry::lookup('Q').is_none());
    assert!(registry::lookup('\u{1F600}').is_none());
}

#[test]
fn test_registry_is_complete() {
    let keys: String = registry::commands().map(|command| command.key).collect();
    assert_eq!(registry::commands().count(), 48);
    for key in "hjklwbeWBE0^${}GgxXdDcCyYpPiIaAoOrRsJuvV~><%*#/zK.".chars() {
        if matches!(key, 'X' | 'Y') {
            assert!(!keys.contains(key), "{key} should not be bound");
        } else {
            assert!(keys.contains(key), "{key} should be bound");
        }
    }
}
