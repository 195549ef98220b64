//! Human-readable rendering of walk results.

use std::fmt::Write as _;

use mantr::WalkResponse;

/// Render a [`WalkResponse`] as one line per path plus a summary line.
///
/// ```text
///  1. 0.900  depth 2  a → b
///
/// 1 path · 1500µs · 3 credits
/// ```
pub fn render_walk(resp: &WalkResponse) -> String {
    let mut out = String::new();

    if resp.paths.is_empty() {
        out.push_str("no paths found\n");
    }
    for (i, path) in resp.paths.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:.3}  depth {}  {}",
            i + 1,
            path.score,
            path.depth,
            path.nodes.join(" → ")
        );
    }

    let noun = if resp.paths.len() == 1 { "path" } else { "paths" };
    let _ = writeln!(
        out,
        "\n{} {noun} · {}µs · {} credits",
        resp.paths.len(),
        resp.latency_us,
        resp.credits_used
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantr::PathResult;

    #[test]
    fn renders_paths_and_summary() {
        let resp = WalkResponse {
            paths: vec![
                PathResult {
                    nodes: vec!["a".into(), "b".into()],
                    score: 0.9,
                    depth: 2,
                },
                PathResult {
                    nodes: vec!["a".into(), "c".into(), "d".into()],
                    score: 0.5,
                    depth: 3,
                },
            ],
            latency_us: 1500,
            credits_used: 3,
        };
        let out = render_walk(&resp);
        assert!(out.contains(" 1. 0.900  depth 2  a → b\n"));
        assert!(out.contains(" 2. 0.500  depth 3  a → c → d\n"));
        assert!(out.ends_with("2 paths · 1500µs · 3 credits\n"));
    }

    #[test]
    fn empty_result() {
        let resp = WalkResponse {
            paths: vec![],
            latency_us: 10,
            credits_used: 1,
        };
        let out = render_walk(&resp);
        assert!(out.starts_with("no paths found\n"));
        assert!(out.contains("0 paths"));
    }
}
