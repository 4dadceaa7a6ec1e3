use std::ffi::OsString;

/// Long flags that older invocations pass with a single dash (`-file x`).
const LEGACY_FLAGS: &[&str] = &["file", "name", "namespace", "ingress-class"];

/// Rewrite `-file`, `-name`, `-namespace` and `-ingress-class` (and their
/// `-flag=value` forms) to the double-dash spelling clap expects.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if s == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = s
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .filter(|rest| {
                let flag = rest.split_once('=').map_or(*rest, |(flag, _)| flag);
                LEGACY_FLAGS.contains(&flag)
            })
            .map(|rest| OsString::from(format!("--{}", rest)));

        out.push(rewritten.unwrap_or(arg));
    }

    out
}
