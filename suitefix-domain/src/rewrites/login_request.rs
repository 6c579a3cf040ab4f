use crate::rewrites::Rewrite;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// The `regex` crate has no backreferences, so the setter's receiver is
// captured separately and compared with the declared name.
static NULL_USER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"LoginRequest (\w+) = new LoginRequest\(\);\s+(\w+)\.setUserName\(null\);")
        .expect("regex for null user name")
});

static NULL_PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"LoginRequest (\w+) = new LoginRequest\(\);\s+(\w+)\.setPassword\(null\);")
        .expect("regex for null password")
});

static LITERAL_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"LoginRequest (\w+) = new LoginRequest\(\);\s+(\w+)\.setUserName\("([^"]*)"\);\s+(\w+)\.setPassword\("([^"]*)"\);"#,
    )
    .expect("regex for literal login pair")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)LoginRequest (\w+) = new LoginRequest\(\);")
        .expect("regex for login declaration")
});

static USER_NAME_SETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\.setUserName\((.*)\);").expect("regex for user name setter")
});

static PASSWORD_SETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\.setPassword\((.*)\);").expect("regex for password setter")
});

/// Collapses `new LoginRequest()` plus `setUserName`/`setPassword` calls into
/// `new LoginRequest(user, password)`.
pub struct LoginRequestRewrite;

impl Rewrite for LoginRequestRewrite {
    fn id(&self) -> &'static str {
        "login_request"
    }

    fn apply(&self, text: &str) -> String {
        let text = null_argument(&NULL_USER_NAME, text, |var| {
            format!(
                "// LoginRequest {var} with null username - need manual fix\n        \
                 LoginRequest {var} = new LoginRequest(null, \"password\");"
            )
        });
        let text = null_argument(&NULL_PASSWORD, &text, |var| {
            format!(
                "// LoginRequest {var} with null password - need manual fix\n        \
                 LoginRequest {var} = new LoginRequest(\"username\", null);"
            )
        });
        let text = literal_pair(&text);
        collapse_setter_lines(&text)
    }
}

fn null_argument(re: &Regex, text: &str, render: impl Fn(&str) -> String) -> String {
    re.replace_all(text, |caps: &Captures| {
        if caps[1] != caps[2] {
            return caps[0].to_string();
        }
        render(&caps[1])
    })
    .into_owned()
}

fn literal_pair(text: &str) -> String {
    LITERAL_PAIR
        .replace_all(text, |caps: &Captures| {
            if caps[1] != caps[2] || caps[1] != caps[4] {
                return caps[0].to_string();
            }
            format!(
                "LoginRequest {} = new LoginRequest(\"{}\", \"{}\");",
                &caps[1], &caps[3], &caps[5]
            )
        })
        .into_owned()
}

/// Line-oriented pass for setter arguments that are not plain string literals.
fn collapse_setter_lines(text: &str) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut i = 0;
    while i < lines.len() {
        if i + 2 < lines.len()
            && let Some(merged) = merge_lines(&lines[i], &lines[i + 1], &lines[i + 2])
        {
            lines[i] = merged;
            lines.drain(i + 1..i + 3);
            continue;
        }
        i += 1;
    }
    lines.join("\n")
}

fn merge_lines(decl: &str, first: &str, second: &str) -> Option<String> {
    let caps = DECLARATION.captures(decl)?;
    let indent = &caps[1];
    let var = &caps[2];

    let user = setter_argument(&USER_NAME_SETTER, var, first.trim())?;
    let password = setter_argument(&PASSWORD_SETTER, var, second.trim())?;
    Some(format!(
        "{indent}LoginRequest {var} = new LoginRequest({user}, {password});"
    ))
}

/// Argument of `var.<setter>(...)`, or `None` when the receiver is another variable.
fn setter_argument<'a>(setter: &Regex, var: &str, line: &'a str) -> Option<&'a str> {
    let caps = setter.captures(line)?;
    if &caps[1] != var {
        return None;
    }
    caps.get(2).map(|m| m.as_str())
}
