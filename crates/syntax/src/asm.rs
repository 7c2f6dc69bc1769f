// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! Assembly (NASM/GAS flavored). Matching is case-insensitive: `MOV` and
//! `mov` are the same instruction.

use crate::scanner::{is_ident_char, is_keyword_ignore_case, LineScanner};
use crate::token::{TokenClass, TokenSpan};

const INSTRUCTIONS: &[&str] = &[
    "mov", "movzx", "movsx", "lea", "add", "sub", "mul", "imul", "div", "idiv", "inc", "dec",
    "neg", "and", "or", "xor", "not", "shl", "shr", "sal", "sar", "rol", "ror", "cmp", "test",
    "jmp", "je", "jne", "jz", "jnz", "jg", "jge", "jl", "jle", "ja", "jae", "jb", "jbe", "call",
    "ret", "push", "pop", "nop", "int", "syscall", "hlt", "loop", "leave", "enter", "cbw",
    "cwd", "cdq", "cqo", "xchg", "cmove", "cmovne", "sete", "setne", "rep", "movsb", "stosb",
];

const REGISTERS: &[&str] = &[
    "rax", "rbx", "rcx", "rdx", "rsi", "rdi", "rbp", "rsp", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15", "eax", "ebx", "ecx", "edx", "esi", "edi", "ebp", "esp", "ax", "bx",
    "cx", "dx", "si", "di", "bp", "sp", "al", "bl", "cl", "dl", "ah", "bh", "ch", "dh", "cs",
    "ds", "es", "fs", "gs", "ss", "rip", "eip",
];

/// Assembler directives without a `.` or `%` prefix.
const DIRECTIVES: &[&str] = &[
    "section", "segment", "global", "extern", "db", "dw", "dd", "dq", "resb", "resw", "resd",
    "resq", "equ", "times", "align", "bits", "org", "default",
];

pub(crate) fn scan(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if ch.is_whitespace() {
            sc.whitespace();
        } else if ch == ';' {
            sc.eat_to_end();
            sc.emit(start, TokenClass::Comment);
        } else if ch == '"' || ch == '\'' {
            sc.eat_quoted(ch);
            sc.emit(start, TokenClass::String);
        } else if ch.is_ascii_digit() {
            sc.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            sc.emit(start, TokenClass::Number);
        } else if ch == '.' || ch == '%' {
            sc.bump();
            sc.eat_while(is_ident_char);
            sc.emit(start, TokenClass::Comment);
        } else if ch.is_alphabetic() || ch == '_' || ch == '@' {
            sc.eat_while(|c| is_ident_char(c) || c == '@' || c == '.');
            let word = &sc.line()[start..sc.pos()];
            let class = if sc.peek() == Some(':') {
                TokenClass::Identifier
            } else if is_keyword_ignore_case(INSTRUCTIONS, word)
                || is_keyword_ignore_case(REGISTERS, word)
            {
                TokenClass::Keyword
            } else if is_keyword_ignore_case(DIRECTIVES, word) {
                TokenClass::Comment
            } else {
                TokenClass::Identifier
            };
            sc.emit(start, class);
        } else {
            sc.single(TokenClass::Punctuation);
        }
    }

    sc.finish()
}
