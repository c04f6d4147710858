use crate::commands;
use crate::engine::Vim;

/// What a command does, which decides whether an operator may use it as a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Movement,
    Change,
    Jump,
    Noop,
}

bitflags::bitflags! {
    /// Dispatch and motion behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u8 {
        /// Waits for a trailing modifier character (`dw`, `gg`, `rx`).
        const REQUIRES_MODIFIER = 0b0001;
        /// Acts on an active selection; the selection is cleared afterwards.
        const VISUAL            = 0b0010;
        /// As a motion, the final character is not included.
        const MOTION_EXCLUSIVE  = 0b0100;
        /// As a motion, whole lines are affected.
        const MOTION_LINEWISE   = 0b1000;
    }
}

pub(crate) type Handler = fn(&mut Vim<'_>, u32, Option<char>);

/// One entry of the command table, keyed by its trigger character.
#[derive(Clone, Copy)]
pub struct Command {
    pub key: char,
    pub kind: CommandKind,
    pub flags: CommandFlags,
    pub(crate) handler: Handler,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Command {
    pub fn requires_modifier(&self) -> bool {
        self.flags.contains(CommandFlags::REQUIRES_MODIFIER)
    }

    pub fn is_visual(&self) -> bool {
        self.flags.contains(CommandFlags::VISUAL)
    }
}

const NONE: CommandFlags = CommandFlags::empty();
const EXCL: CommandFlags = CommandFlags::MOTION_EXCLUSIVE;
const LINE: CommandFlags = CommandFlags::MOTION_LINEWISE;
const REQ: CommandFlags = CommandFlags::REQUIRES_MODIFIER;
const VIS: CommandFlags = CommandFlags::VISUAL;
const REQ_VIS: CommandFlags = REQ.union(VIS);

const fn cmd(key: char, kind: CommandKind, flags: CommandFlags, handler: Handler) -> Command {
    Command {
        key,
        kind,
        flags,
        handler,
    }
}

use CommandKind::{Change, Jump, Movement, Noop};

const COMMANDS: &[Command] = &[
    cmd('.', Change, NONE, commands::cmd_repeat),
    cmd('/', Jump, NONE, commands::cmd_begin_search),
    cmd('$', Movement, NONE, commands::cmd_line_end),
    cmd('0', Movement, EXCL, commands::cmd_line0),
    cmd('^', Movement, EXCL, commands::cmd_line_start),
    cmd('}', Movement, EXCL, commands::cmd_forward_paragraph),
    cmd('{', Movement, EXCL, commands::cmd_backward_paragraph),
    cmd('#', Jump, NONE, commands::cmd_match_backward),
    cmd('*', Jump, NONE, commands::cmd_match_forward),
    cmd('>', Change, NONE, commands::cmd_indent),
    cmd('<', Change, NONE, commands::cmd_unindent),
    cmd('%', Jump, NONE, commands::cmd_matching_bracket),
    cmd('~', Change, NONE, commands::cmd_toggle_case),
    cmd('A', Change, NONE, commands::cmd_insert_end),
    cmd('a', Change, NONE, commands::cmd_insert_after),
    cmd('B', Movement, EXCL, commands::cmd_backward_word),
    cmd('b', Movement, EXCL, commands::cmd_backward_word),
    cmd('c', Change, REQ_VIS, commands::cmd_change),
    cmd('C', Change, NONE, commands::cmd_change_to_end),
    cmd('d', Change, REQ_VIS, commands::cmd_delete),
    cmd('D', Change, NONE, commands::cmd_delete_to_end),
    cmd('E', Movement, NONE, commands::cmd_forward_word_end),
    cmd('e', Movement, NONE, commands::cmd_forward_word_end),
    cmd('G', Movement, LINE, commands::cmd_goto_line),
    cmd('g', Change, REQ, commands::cmd_g),
    cmd('h', Movement, EXCL, commands::cmd_move_backward),
    cmd('I', Change, NONE, commands::cmd_insert_start),
    cmd('i', Change, NONE, commands::cmd_insert),
    cmd('j', Movement, LINE, commands::cmd_move_down),
    cmd('J', Change, NONE, commands::cmd_join),
    cmd('k', Movement, LINE, commands::cmd_move_up),
    cmd('K', Noop, NONE, commands::cmd_jump_to_doc),
    cmd('l', Movement, EXCL, commands::cmd_move_forward),
    cmd('O', Change, NONE, commands::cmd_insert_before_line),
    cmd('o', Change, NONE, commands::cmd_insert_after_line),
    cmd('P', Change, NONE, commands::cmd_paste_before),
    cmd('p', Change, NONE, commands::cmd_paste_after),
    cmd('R', Change, NONE, commands::cmd_overwrite),
    cmd('r', Change, REQ, commands::cmd_replace),
    cmd('s', Change, NONE, commands::cmd_substitute),
    cmd('u', Change, NONE, commands::cmd_undo),
    cmd('V', Noop, NONE, commands::cmd_select_line),
    cmd('v', Noop, NONE, commands::cmd_select),
    cmd('W', Movement, EXCL, commands::cmd_forward_word),
    cmd('w', Movement, EXCL, commands::cmd_forward_word),
    cmd('x', Change, VIS, commands::cmd_delete_selection),
    cmd('y', Noop, REQ_VIS, commands::cmd_yank),
    cmd('z', Noop, REQ, commands::cmd_center),
];

const fn build_table(commands: &[Command]) -> [Option<Command>; 128] {
    let mut table = [None; 128];
    let mut i = 0;
    while i < commands.len() {
        let key = commands[i].key as usize;
        assert!(key < 128, "command keys must be ASCII");
        table[key] = Some(commands[i]);
        i += 1;
    }
    table
}

static TABLE: [Option<Command>; 128] = build_table(COMMANDS);

/// Looks up the command bound to `key`.
pub fn lookup(key: char) -> Option<&'static Command> {
    TABLE.get(key as usize)?.as_ref()
}

/// Every registered command, in table order.
pub fn commands() -> impl Iterator<Item = &'static Command> {
    TABLE.iter().flatten()
}
