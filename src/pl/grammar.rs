//! PL line grammar
//!
//! Each line kind of the format is one anchored regex, matched against a single line with
//! its terminator already removed. The building blocks:
//!
//!     KEY      [A-Za-z_][A-Za-z0-9_.]*
//!     COMMENT  #.*
//!     VALUE    first char not one of `= @ % #` or whitespace, then anything up to a comment
//!     FILE     optional `scheme:` prefix, then `/`-separated segments free of
//!              space, tab, newline, `;`, `#`, `+` and `&`
//!     ALIAS    [ alias ]
//!
//! Which pattern wins when several match is decided by
//! [classification](crate::pl::classification), not here.

use once_cell::sync::Lazy;
use regex::Regex;

const KEY: &str = r"^(?P<key>[a-zA-Z_][a-zA-Z0-9_.]*)\s*";
const COMMENT: &str = r"(?P<comment>#.*)";
const VALUE: &str = r"(?P<value>[^=@%#\s][^#]*?)\s*";
const FILE: &str = r"(?P<file>(?:[a-zA-Z0-9_]*:)?/?[^/ \t\n;#+&]+(?:/[^/ \t\n;#+&]+)*)\s*";
const ALIAS: &str = r"(?:\[\s*(?P<alias>[a-zA-Z_.][a-zA-Z0-9_.]*)\s*\]\s*)?";

/// Keys that introduce an inheritance line rather than an assignment
pub const RESERVED_KEYS: &[&str] = &["extends", "template"];

fn compile(parts: &[&str]) -> Regex {
    let pattern: String = parts.concat();
    Regex::new(&pattern).unwrap()
}

/// `key (= | % | + | -) value [#comment]`
pub static ONE_LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[KEY, r"(?P<operator>=|%|\+|-)\s*", VALUE, COMMENT, "?$"]));

/// `key (== | += | -= | %=) [#comment]`
pub static MULTI_LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[KEY, r"(?P<operator>==|\+=|-=|%=)\s*", COMMENT, "?$"]));

/// `==` alone on its line
pub static END_MULTI_LINE: Lazy<Regex> = Lazy::new(|| compile(&[r"^\s*==\s*$"]));

/// `(extends|template) = file [#comment]`
pub static EXTENDS_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(&[
        r"^(?P<keyword>extends|template)\s*=\s*",
        FILE,
        COMMENT,
        "?$",
    ])
});

/// `key (=@ | +=@ | -=@ | %=@) file [#comment]`
pub static FROM_FILE_LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[KEY, r"(?P<operator>=@|\+=@|-=@|%=@)\s*", FILE, COMMENT, "?$"]));

/// `key =$ file [#comment]`
pub static URL_LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[KEY, r"(?P<operator>=\$)\s*", FILE, COMMENT, "?$"]));

/// `key =: component [#comment]`
pub static COMPONENT_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(&[
        KEY,
        r"\s*(?P<operator>=:)\s*(?P<component>\w+)\s*",
        COMMENT,
        "?$",
    ])
});

/// `@ file [alias] [#comment]`
pub static DEPENDENCY_LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[r"^@\s*", FILE, ALIAS, COMMENT, "?$"]));

/// `# ...`
pub static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| compile(&[r"^\s*", COMMENT, "$"]));

/// Whitespace only
pub static EMPTY_LINE: Lazy<Regex> = Lazy::new(|| compile(&[r"^\s*$"]));
