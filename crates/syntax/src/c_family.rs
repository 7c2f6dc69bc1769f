// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! Scanner for curly-brace languages: C/C++, JavaScript/TypeScript, Go,
//! Rust and Lua.
//!
//! The languages differ only in keyword sets, comment markers and how they
//! treat quote characters, so one scanner is parameterized by a [`CLike`]
//! profile per language.

use crate::scanner::{is_ident_char, is_ident_start, is_keyword, LineScanner};
use crate::token::{TokenClass, TokenSpan};

/// What a single quote starts.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum SingleQuote {
    /// A character literal (`'a'`, `'\n'`).
    Char,
    /// A string literal, as in JavaScript and Lua.
    String,
    /// A character literal when closed nearby, otherwise a lifetime or
    /// label (`'a`, `'static`).
    CharOrLifetime,
}

pub(crate) struct CLike {
    pub keywords: &'static [&'static str],
    pub line_comment: &'static str,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub single_quote: SingleQuote,
    /// Backtick template/raw strings (JavaScript, Go).
    pub backtick_strings: bool,
    /// `#` at the start of a line begins a preprocessor directive.
    pub preprocessor: bool,
    /// C++ raw strings: `R"delim( ... )delim"`.
    pub raw_strings: bool,
    /// `$` may appear in identifiers.
    pub dollar_idents: bool,
}

const TWO_CHAR_OPERATORS: &[&str] = &[
    "::", "->", "=>", "++", "--", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "..",
];

pub(crate) fn scan(profile: &CLike, line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if ch.is_whitespace() {
            sc.whitespace();
        } else if let Some((open, close)) = profile
            .block_comment
            .filter(|(open, _)| sc.starts_with(open))
        {
            sc.bump_n(open.chars().count());
            sc.eat_through(close);
            sc.emit(start, TokenClass::Comment);
        } else if sc.starts_with(profile.line_comment) {
            sc.eat_to_end();
            sc.emit(start, TokenClass::Comment);
        } else if profile.preprocessor && ch == '#' && sc.at_line_start() {
            sc.eat_to_end();
            sc.emit(start, TokenClass::Comment);
        } else if profile.raw_strings && sc.starts_with("R\"") {
            raw_string(&mut sc);
            sc.emit(start, TokenClass::String);
        } else if ch == '"' {
            sc.eat_quoted('"');
            sc.emit(start, TokenClass::String);
        } else if ch == '`' && profile.backtick_strings {
            sc.eat_quoted('`');
            sc.emit(start, TokenClass::String);
        } else if ch == '\'' {
            let class = single_quote(&mut sc, profile.single_quote);
            sc.emit(start, class);
        } else if ch.is_ascii_digit() {
            sc.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
            sc.emit(start, TokenClass::Number);
        } else if is_ident_start(ch) || (profile.dollar_idents && ch == '$') {
            let dollar = profile.dollar_idents;
            sc.eat_while(|c| is_ident_char(c) || (dollar && c == '$'));
            let ident = &sc.line()[start..sc.pos()];
            let class = if is_keyword(profile.keywords, ident) {
                TokenClass::Keyword
            } else {
                TokenClass::Identifier
            };
            sc.emit(start, class);
        } else if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| sc.starts_with(op)) {
            sc.bump_n(op.chars().count());
            sc.emit(start, TokenClass::Punctuation);
        } else {
            sc.single(TokenClass::Punctuation);
        }
    }

    sc.finish()
}

/// `R"delim( ... )delim"`; unterminated raw strings run to end of line.
fn raw_string(sc: &mut LineScanner<'_>) {
    sc.bump_n(2);
    let mut delim = String::new();
    while let Some(ch) = sc.peek() {
        sc.bump();
        if ch == '(' {
            break;
        }
        delim.push(ch);
    }
    let close = format!("){delim}\"");
    sc.eat_through(&close);
}

fn single_quote(sc: &mut LineScanner<'_>, mode: SingleQuote) -> TokenClass {
    match mode {
        SingleQuote::Char => {
            sc.eat_quoted('\'');
            TokenClass::Char
        }
        SingleQuote::String => {
            sc.eat_quoted('\'');
            TokenClass::String
        }
        SingleQuote::CharOrLifetime => {
            if let Some(len) = closed_char_literal(sc) {
                sc.bump_n(len);
                TokenClass::Char
            } else {
                sc.bump();
                sc.eat_while(is_ident_char);
                TokenClass::Identifier
            }
        }
    }
}

/// Length of a closed char literal at the cursor (`'x'`, `'\n'`,
/// `'\u{1F600}'`), or `None` if the quote does not close one.
fn closed_char_literal(sc: &LineScanner<'_>) -> Option<usize> {
    match sc.peek_at(1)? {
        '\\' => {
            // Escapes are short; look for the closing quote within a few chars.
            (3..12).find(|&i| sc.peek_at(i) == Some('\'')).map(|i| i + 1)
        }
        '\'' => None,
        _ => (sc.peek_at(2) == Some('\'')).then_some(3),
    }
}

pub(crate) const C_KEYWORDS: &[&str] = &[
    // C
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Bool", "bool", "true", "false", "NULL",
    // C++
    "class", "namespace", "template", "typename", "public", "private", "protected", "virtual",
    "override", "final", "new", "delete", "this", "using", "try", "catch", "throw", "operator",
    "friend", "explicit", "constexpr", "consteval", "nullptr", "noexcept", "static_cast",
    "dynamic_cast", "reinterpret_cast", "const_cast", "mutable", "decltype", "concept",
    "requires", "co_await", "co_return", "co_yield", "thread_local", "alignas", "alignof",
    // common library types
    "std", "string", "vector", "map", "unordered_map", "set", "unique_ptr", "shared_ptr",
    "size_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t",
    "uint64_t", "wchar_t", "FILE",
];

pub(crate) const JS_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof",
    "var", "void", "while", "with", "yield", "async", "await", "of", "static", "get", "set",
    "null", "undefined", "true", "false", "NaN",
    // TypeScript
    "interface", "type", "enum", "implements", "namespace", "declare", "readonly", "abstract",
    "private", "public", "protected", "keyof", "as", "any", "unknown", "never", "string",
    "number", "boolean",
];

pub(crate) const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "true", "false", "nil", "iota",
    "bool", "byte", "rune", "string", "error", "int", "int8", "int16", "int32", "int64",
    "uint", "uint8", "uint16", "uint32", "uint64", "uintptr", "float32", "float64", "any",
    "make", "len", "cap", "append", "new", "panic", "recover",
];

pub(crate) const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while",
    // prelude types
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
    "i64", "i128", "isize", "f32", "f64", "String", "Vec", "Box", "Option", "Some", "None",
    "Result", "Ok", "Err",
];

pub(crate) const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    "self", "require", "print", "pairs", "ipairs",
];

pub(crate) static C: CLike = CLike {
    keywords: C_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote: SingleQuote::Char,
    backtick_strings: false,
    preprocessor: true,
    raw_strings: true,
    dollar_idents: false,
};

pub(crate) static JAVASCRIPT: CLike = CLike {
    keywords: JS_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote: SingleQuote::String,
    backtick_strings: true,
    preprocessor: false,
    raw_strings: false,
    dollar_idents: true,
};

pub(crate) static GO: CLike = CLike {
    keywords: GO_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote: SingleQuote::Char,
    backtick_strings: true,
    preprocessor: false,
    raw_strings: false,
    dollar_idents: false,
};

pub(crate) static RUST: CLike = CLike {
    keywords: RUST_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    single_quote: SingleQuote::CharOrLifetime,
    backtick_strings: false,
    preprocessor: false,
    raw_strings: false,
    dollar_idents: false,
};

pub(crate) static LUA: CLike = CLike {
    keywords: LUA_KEYWORDS,
    line_comment: "--",
    block_comment: Some(("--[[", "]]")),
    single_quote: SingleQuote::String,
    backtick_strings: false,
    preprocessor: false,
    raw_strings: false,
    dollar_idents: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenClass::{Char, Comment, Identifier, Keyword, Number, Punctuation, Text};
    use pretty_assertions::assert_eq;

    fn classes(profile: &CLike, line: &str) -> Vec<(String, TokenClass)> {
        let chars: Vec<char> = line.chars().collect();
        scan(profile, &chars)
            .into_iter()
            .map(|s| (chars[s.start..s.end()].iter().collect(), s.class))
            .collect()
    }

    fn owned(expected: &[(&str, TokenClass)]) -> Vec<(String, TokenClass)> {
        expected.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn test_c_declaration_with_comment() {
        assert_eq!(
            classes(&C, "int x; // c"),
            owned(&[
                ("int", Keyword),
                (" ", Text),
                ("x", Identifier),
                (";", Punctuation),
                (" ", Text),
                ("// c", Comment),
            ])
        );
    }

    #[test]
    fn test_c_preprocessor_line() {
        assert_eq!(
            classes(&C, "  #include <stdio.h>"),
            owned(&[("  ", Text), ("#include <stdio.h>", Comment)])
        );
    }

    #[test]
    fn test_c_strings_chars_numbers() {
        assert_eq!(
            classes(&C, r#"f("a\"b", 'c', 0x1F);"#),
            owned(&[
                ("f", Identifier),
                ("(", Punctuation),
                (r#""a\"b""#, TokenClass::String),
                (",", Punctuation),
                (" ", Text),
                ("'c'", Char),
                (",", Punctuation),
                (" ", Text),
                ("0x1F", Number),
                (")", Punctuation),
                (";", Punctuation),
            ])
        );
    }

    #[test]
    fn test_c_block_comment_mid_line_and_unclosed() {
        assert_eq!(
            classes(&C, "a /* b */ c /* d"),
            owned(&[
                ("a", Identifier),
                (" ", Text),
                ("/* b */", Comment),
                (" ", Text),
                ("c", Identifier),
                (" ", Text),
                ("/* d", Comment),
            ])
        );
    }

    #[test]
    fn test_cpp_two_char_operators_and_raw_string() {
        assert_eq!(
            classes(&C, r#"std::cout << R"x(a"b)x";"#),
            owned(&[
                ("std", Keyword),
                ("::", Punctuation),
                ("cout", Identifier),
                (" ", Text),
                ("<<", Punctuation),
                (" ", Text),
                (r#"R"x(a"b)x""#, TokenClass::String),
                (";", Punctuation),
            ])
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(
            classes(&C, r#"x = "abc\"#),
            owned(&[
                ("x", Identifier),
                (" ", Text),
                ("=", Punctuation),
                (" ", Text),
                (r#""abc\"#, TokenClass::String),
            ])
        );
    }

    #[test]
    fn test_js_backticks_and_dollar_idents() {
        assert_eq!(
            classes(&JAVASCRIPT, "const $el = `hi ${x}`;"),
            owned(&[
                ("const", Keyword),
                (" ", Text),
                ("$el", Identifier),
                (" ", Text),
                ("=", Punctuation),
                (" ", Text),
                ("`hi ${x}`", TokenClass::String),
                (";", Punctuation),
            ])
        );
    }

    #[test]
    fn test_js_single_quotes_are_strings() {
        assert_eq!(
            classes(&JAVASCRIPT, "'it'"),
            owned(&[("'it'", TokenClass::String)])
        );
    }

    #[test]
    fn test_rust_lifetime_vs_char() {
        assert_eq!(
            classes(&RUST, "fn f<'a>(c: char) { '\\n' }"),
            owned(&[
                ("fn", Keyword),
                (" ", Text),
                ("f", Identifier),
                ("<", Punctuation),
                ("'a", Identifier),
                (">", Punctuation),
                ("(", Punctuation),
                ("c", Identifier),
                (":", Punctuation),
                (" ", Text),
                ("char", Keyword),
                (")", Punctuation),
                (" ", Text),
                ("{", Punctuation),
                (" ", Text),
                ("'\\n'", Char),
                (" ", Text),
                ("}", Punctuation),
            ])
        );
    }

    #[test]
    fn test_go_keywords() {
        let spans = classes(&GO, "func main() { defer close(ch) }");
        assert_eq!(spans[0], ("func".to_string(), Keyword));
        assert!(spans.contains(&("defer".to_string(), Keyword)));
        assert!(spans.contains(&("ch".to_string(), Identifier)));
    }

    #[test]
    fn test_lua_comments() {
        assert_eq!(
            classes(&LUA, "local x = 1 -- note"),
            owned(&[
                ("local", Keyword),
                (" ", Text),
                ("x", Identifier),
                (" ", Text),
                ("=", Punctuation),
                (" ", Text),
                ("1", Number),
                (" ", Text),
                ("-- note", Comment),
            ])
        );
        assert_eq!(
            classes(&LUA, "--[[ block ]] y"),
            owned(&[("--[[ block ]]", Comment), (" ", Text), ("y", Identifier)])
        );
    }
}
