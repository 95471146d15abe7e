//! Expression pre-transform.
//!
//! An ordered list of local rewrites applied to one flat level of an
//! expression before its atoms are expanded. Order matters: array and
//! anonymous class construction must be pulled out before `.length()` and
//! cast handling look at the remaining `"B#"` atoms.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::limits::MAX_REWRITE_PASSES;
use sketchc_common::{HOST_HANDLE, diagnostic_codes};
use sketchc_scanner::AtomKind;
use tracing::trace;

use super::state::{ParserState, strip_delimiters};
use crate::syntax::patterns::{FUNCTIONS_RE, QNAME, TrimmedSpaces, replace_matches};

/// `new int[] {1, 2}`: 1: type, 2: initializer atom.
static NEW_ARRAY_INIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bnew\s+({QNAME})(?:\s*"C\d+")+\s*("A\d+")"#)).expect("valid regex")
});

/// `new Runnable() {...}`
static NEW_INLINE_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bnew\s+({QNAME})(?:\s*"B\d+")\s*("A\d+")"#)).expect("valid regex")
});

/// `new float[3][]`: 1: type, 2: dimension atoms.
static NEW_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bnew\s+({QNAME})\s*("C\d+"(?:\s*"C\d+")*)"#)).expect("valid regex")
});

static INDEX_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""C(\d+)""#).expect("valid regex"));

static EMPTY_DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\]").expect("valid regex"));

static DIMENSION_JOIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\]\s*\[\s*").expect("valid regex"));

static LENGTH_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\.\s*length)\s*"B\d+""#).expect("valid regex"));

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9A-Fa-f]{6})\b").expect("valid regex"));

/// A group atom followed by something it could be casting.
static CAST_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""B(\d+)"(\s*(?:[\w$']|"B))"#).expect("valid regex"));

static CAST_ATOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^\(\s*{QNAME}\s*(?:"C\d+"\s*)*\)$"#)).expect("valid regex")
});

static INT_CAST_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\s*int\s*\)$").expect("valid regex"));

static EMPTY_INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*\]$").expect("valid regex"));

static INT_CAST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(int\)([^,\]\)\}\?:\*\+\-/\^\|%&~<>=]+)").expect("valid regex")
});

static SUPER_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bsuper(\s*"B\d+")"#).expect("valid regex"));

static SUPER_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bsuper(\s*\.)").expect("valid regex"));

/// 1: number without its leading zeros, 2: integer part.
static LEADING_ZEROS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b0+((\d*)(?:\.\d*)?(?:[eE][\-+]?\d+)?[fF]?)\b").expect("valid regex")
});

static FLOAT_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\.?\d+\.?)[fF]\b").expect("valid regex"));

static MODULO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s])%([^=\s])").expect("valid regex"));

static PROPERTY_CALL_NAMES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(frameRate|keyPressed|mousePressed)\b").expect("valid regex")
});

static FOLLOWED_BY_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*"B"#).expect("valid regex"));

static PRIMITIVE_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\b(boolean|byte|char|float|int)\s*"B"#).expect("valid regex"));

/// 1: index or `.length`, 2: index atom, 3: its number, 4: assignment,
/// 5: assigned value.
static PIXELS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bpixels\b\s*(("C(\d+)")|\.length)?(\s*=([^=,\]\)\}][^,\]\)\}]*))?"#)
        .expect("valid regex")
});

/// A receiver chain followed by a Java string or object method call.
/// 1: receiver including the final dot, 2: method, 3: arguments atom.
static JAVA_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"((?:'\d+'|\b[A-Za-z_$][\w$]*\s*(?:"[BC]\d+")*)\s*\.\s*(?:[A-Za-z_$][\w$]*\s*(?:"[BC]\d+"\s*)*\.\s*)*)(replace|replaceAll|replaceFirst|contains|equals|equalsIgnoreCase|hashCode|toCharArray|printStackTrace|split|startsWith|endsWith|codePointAt|matches)\s*"B(\d+)""#,
    )
    .expect("valid regex")
});

static TRAILING_DOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s*$").expect("valid regex"));

/// 1: subject chain, 2: type.
static INSTANCEOF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"((?:'\d+'|\b[A-Za-z_$][\w$]*\s*(?:"[BC]\d+")*)\s*(?:\.\s*[A-Za-z_$][\w$]*\s*(?:"[BC]\d+"\s*)*)*)instanceof\s+([A-Za-z_$][\w$]*\s*(?:\.\s*[A-Za-z_$][\w$]*)*)"#,
    )
    .expect("valid regex")
});

static THIS_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bthis(\s*"B\d+")"#).expect("valid regex"));

impl ParserState<'_> {
    /// Apply every dialect rewrite to one flat expression level.
    pub(crate) fn pre_transform(&mut self, expr: &str) -> String {
        let s = self.rewrite_construction(expr);
        let s = LENGTH_CALL_RE.replace_all(&s, "${1}");
        let s = HEX_COLOR_RE.replace_all(&s, "0xFF${1}");
        let s = self.remove_casts(&s);
        let s = INT_CAST_RE.replace_all(&s, |caps: &Captures<'_>| {
            let arg = TrimmedSpaces::new(&caps[1]);
            arg.untrim(&format!("__int_cast({})", arg.middle))
        });
        let s = SUPER_CALL_RE.replace_all(&s, "$$superCstr${1}");
        let s = SUPER_MEMBER_RE.replace_all(&s, "$$super${1}");
        let s = normalize_numbers(&s);
        let s = MODULO_RE.replace_all(&s, "${1} % ${2}");
        let s = replace_matches(&PROPERTY_CALL_NAMES_RE, &s, |caps| {
            let end = caps.get(0).map_or(0, |m| m.end());
            (!FOLLOWED_BY_CALL_RE.is_match(&s[end..])).then(|| format!("__{}", &caps[1]))
        });
        let s = PRIMITIVE_CALL_RE.replace_all(&s, |caps: &Captures<'_>| {
            let name = &caps[1];
            format!("parse{}{}\"B", name[..1].to_uppercase(), &name[1..])
        });
        let s = self.rewrite_pixels(&s);
        let s = self.proxy_java_methods(&s);
        let s = self.rewrite_instanceof(&s);
        THIS_CALL_RE.replace_all(&s, "$$constr${1}").into_owned()
    }

    /// Array initializers, anonymous classes, function literals and sized
    /// array construction.
    fn rewrite_construction(&mut self, expr: &str) -> String {
        let s = NEW_ARRAY_INIT_RE.replace_all(expr, "${2}");
        let s = NEW_INLINE_CLASS_RE.replace_all(&s, |caps: &Captures<'_>| {
            self.push_atom(&caps[0], AtomKind::InlineClass)
        });
        let s = FUNCTIONS_RE.replace_all(&s, |caps: &Captures<'_>| {
            self.push_atom(&caps[0], AtomKind::Function)
        });
        NEW_ARRAY_RE
            .replace_all(&s, |caps: &Captures<'_>| {
                let type_name = &caps[1];
                let dimensions = INDEX_ATOM_RE.replace_all(&caps[2], |index: &Captures<'_>| {
                    let index = index[1].parse().unwrap_or(0);
                    self.atom_text(index)
                });
                let dimensions = EMPTY_DIMENSION_RE.replace_all(&dimensions, "[null]");
                let dimensions = DIMENSION_JOIN_RE.replace_all(&dimensions, ", ");
                let initializer = format!("{{{}}}", strip_delimiters(&dimensions));
                let initializer = self.push_atom(initializer, AtomKind::Block);
                let args = self.push_atom(format!("('{type_name}', {initializer})"), AtomKind::Group);
                trace!(type_name = %type_name, "array construction");
                format!("{HOST_HANDLE}.createJavaArray{args}")
            })
            .into_owned()
    }

    /// `(Type) x` drops the cast, `(int) x` is kept for `__int_cast`, and
    /// `(Type[]) x` is only a cast when every index atom is empty.
    fn remove_casts(&mut self, s: &str) -> String {
        replace_matches(&CAST_CANDIDATE_RE, s, |caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            // `foo(a) b` is a call, not a cast.
            if s[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '"')
            {
                return None;
            }
            let index: usize = caps[1].parse().ok()?;
            let atom = self.atoms.get(index)?;
            if !CAST_ATOM_RE.is_match(atom) {
                return None;
            }
            let next = &caps[2];
            if INT_CAST_ATOM_RE.is_match(atom) {
                return Some(format!("(int){next}"));
            }
            if let Some(first) = INDEX_ATOM_RE.captures(atom) {
                let dimension = first[1].parse().ok().and_then(|i| self.atoms.get(i));
                if !dimension.is_some_and(|d| EMPTY_INDEX_RE.is_match(d)) {
                    return None;
                }
            }
            Some(next.to_string())
        })
    }

    /// `pixels[i] = c`, `pixels[i]`, `pixels.length`, `pixels = a` and bare
    /// `pixels` become accessor calls.
    fn rewrite_pixels(&mut self, s: &str) -> String {
        PIXELS_RE
            .replace_all(s, |caps: &Captures<'_>| {
                let value = caps.get(5).map(|m| m.as_str().trim());
                if let Some(index) = caps.get(3) {
                    let atom = self.atom_text(index.as_str().parse().unwrap_or(0));
                    let index = strip_delimiters(&atom);
                    return match value {
                        Some(value) => format!(
                            "pixels.setPixel{}",
                            self.push_atom(format!("({index},{value})"), AtomKind::Group)
                        ),
                        None => format!(
                            "pixels.getPixel{}",
                            self.push_atom(format!("({index})"), AtomKind::Group)
                        ),
                    };
                }
                if caps.get(1).is_some() {
                    return format!("pixels.getLength{}", self.push_atom("()", AtomKind::Group));
                }
                match value {
                    Some(value) => format!(
                        "pixels.set{}",
                        self.push_atom(format!("({value})"), AtomKind::Group)
                    ),
                    None => format!("pixels.toArray{}", self.push_atom("()", AtomKind::Group)),
                }
            })
            .into_owned()
    }

    /// `x.equals(y)` becomes `__equals(x, y)` so the call works whether `x`
    /// is a host string or a sketch object. Rewriting can expose another
    /// chain, so this repeats until nothing matches.
    fn proxy_java_methods(&mut self, s: &str) -> String {
        let mut s = s.to_string();
        for _ in 0..MAX_REWRITE_PASSES {
            if !JAVA_METHOD_RE.is_match(&s) {
                return s;
            }
            s = JAVA_METHOD_RE
                .replace_all(&s, |caps: &Captures<'_>| {
                    let subject = TRAILING_DOT_RE.replace(&caps[1], "");
                    let atom = self.atom_text(caps[3].parse().unwrap_or(0));
                    let args = TrimmedSpaces::new(strip_delimiters(&atom)).middle.to_string();
                    let call = if args.is_empty() {
                        format!("({subject})")
                    } else {
                        format!("({subject},{args})")
                    };
                    format!("__{}{}", &caps[2], self.push_atom(call, AtomKind::Group))
                })
                .into_owned();
        }
        self.report_rewrite_limit("java method proxy", &s)
    }

    /// `x instanceof T` becomes `__instanceof(x, T)`.
    fn rewrite_instanceof(&mut self, s: &str) -> String {
        let mut s = s.to_string();
        for _ in 0..MAX_REWRITE_PASSES {
            if !INSTANCEOF_RE.is_match(&s) {
                return s;
            }
            s = INSTANCEOF_RE
                .replace_all(&s, |caps: &Captures<'_>| {
                    let args = format!("({}, {})", caps[1].trim(), caps[2].trim());
                    format!("__instanceof{}", self.push_atom(args, AtomKind::Group))
                })
                .into_owned();
        }
        self.report_rewrite_limit("instanceof", &s)
    }

    fn report_rewrite_limit(&mut self, rewrite: &str, s: &str) -> String {
        self.diagnostics.report(
            diagnostic_codes::REWRITE_LIMIT_REACHED,
            &[rewrite, &MAX_REWRITE_PASSES.to_string()],
        );
        s.to_string()
    }
}

/// `00.5` to `0.5` and `0010f` to `10`, then `3.0f` to `3.0`. Plain
/// integers such as `0010` keep their zeros.
fn normalize_numbers(s: &str) -> String {
    let s = LEADING_ZEROS_RE.replace_all(s, |caps: &Captures<'_>| {
        let number = &caps[1];
        let int_part = &caps[2];
        if number == int_part {
            caps[0].to_string()
        } else if int_part.is_empty() {
            format!("0{number}")
        } else {
            number.to_string()
        }
    });
    FLOAT_SUFFIX_RE.replace_all(&s, "${1}").into_owned()
}

#[cfg(test)]
#[path = "../../tests/pretransform_tests.rs"]
mod tests;
