//! String heuristics used to classify command output.
//!
//! Everything here works on raw text lines rather than structured fields.
//! Known limitations: the degraded check matches anywhere on a row (so an
//! unrelated "Error" in a name counts), and commands are split on plain
//! whitespace (quoted arguments break). A header is recognized only by a
//! first token of `NAME`, so the `NAMESPACE NAME ...` header printed by
//! `--all-namespaces` reads as a row. Callers only go through the
//! functions below so the text matching can be replaced in one place.

use crate::types::{Command, ResourceStatus};

/// Substrings that mark a row as degraded.
pub const DEGRADED_MARKERS: &[&str] = &["Pending", "CrashLoopBackOff", "Error"];

/// First token of a table header row.
pub const HEADER_TOKEN: &str = "NAME";

/// Status reported when a row has fewer than three fields.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Verbs that create resources or apply manifests.
pub const CREATION_VERBS: &[&str] = &["create", "apply"];

/// Line prefixes kubectl prints for created or configured resources.
pub const CREATION_PREFIXES: &[&str] = &[
    "namespace/",
    "service/",
    "deployment/",
    "deployment.apps/",
    "pod/",
    "configmap/",
    "secret/",
    "serviceaccount/",
    "ingress/",
    "job/",
    "job.batch/",
    "cronjob/",
    "cronjob.batch/",
    "statefulset/",
    "statefulset.apps/",
    "daemonset/",
    "daemonset.apps/",
    "replicaset/",
    "persistentvolumeclaim/",
    "role/",
    "rolebinding/",
];

/// One resource row of tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow<'a> {
    pub line: &'a str,
    pub status: ResourceStatus,
}

impl ResourceRow<'_> {
    pub fn is_degraded(&self) -> bool {
        is_degraded(self.line)
    }
}

/// True if the row text contains any degraded marker.
pub fn is_degraded(line: &str) -> bool {
    DEGRADED_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Parse whitespace-delimited rows, skipping blank lines and header rows.
///
/// Status is the third field, or [`UNKNOWN_STATUS`] if the row is shorter.
pub fn parse_resource_rows(output: &str) -> Vec<ResourceRow<'_>> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            if name == HEADER_TOKEN {
                return None;
            }
            let status = fields.nth(1).unwrap_or(UNKNOWN_STATUS);
            Some(ResourceRow {
                line,
                status: ResourceStatus::new(name, status),
            })
        })
        .collect()
}

/// True if the verb following the tool token creates or applies resources.
pub fn is_creation(command: &Command) -> bool {
    command
        .tokens()
        .nth(1)
        .is_some_and(|verb| CREATION_VERBS.contains(&verb))
}

/// Namespace named by the first `-n`/`--namespace` flag, if any.
pub fn extract_namespace(command: &Command) -> Option<String> {
    let mut tokens = command.tokens();
    while let Some(token) = tokens.next() {
        if token == "-n" || token == "--namespace" {
            return tokens.next().map(String::from);
        }
        if let Some(ns) = token.strip_prefix("--namespace=") {
            if !ns.is_empty() {
                return Some(ns.to_string());
            }
        }
    }
    None
}

/// True if `line` reports a created or configured resource.
pub fn is_creation_line(line: &str) -> bool {
    CREATION_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(line: &str) -> Command {
        Command::new(line, "kubectl").unwrap()
    }

    // ── is_degraded ──────────────────────────────────────────────

    #[test]
    fn degraded_markers_match_anywhere() {
        assert!(is_degraded("web-1   0/1   CrashLoopBackOff   5   3m"));
        assert!(is_degraded("web-2   0/1   Pending            0   1m"));
        assert!(is_degraded("job-x   0/1   Error              0   1m"));
        assert!(is_degraded("ErrorPage-7   1/1   Running   0   1h"));
        assert!(!is_degraded("web-3   1/1   Running   0   1h"));
    }

    #[test]
    fn degraded_is_case_sensitive() {
        assert!(!is_degraded("web-1 1/1 pending"));
        assert!(!is_degraded("web-1 1/1 error"));
    }

    // ── parse_resource_rows ──────────────────────────────────────

    #[test]
    fn parses_rows_in_order() {
        let output = "NAME    READY   STATUS             RESTARTS   AGE\n\
                      web-1   1/1     Running            0          1h\n\
                      web-2   0/1     CrashLoopBackOff   4          2m\n";
        let rows = parse_resource_rows(output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, ResourceStatus::new("web-1", "Running"));
        assert_eq!(rows[1].status, ResourceStatus::new("web-2", "CrashLoopBackOff"));
        assert!(!rows[0].is_degraded());
        assert!(rows[1].is_degraded());
    }

    #[test]
    fn short_row_has_unknown_status() {
        let rows = parse_resource_rows("NAME STATUS\nweb-1 Running");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ResourceStatus::new("web-1", UNKNOWN_STATUS));
    }

    #[test]
    fn blank_lines_and_headers_skipped() {
        let rows = parse_resource_rows("\n   \nNAME READY STATUS\n\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn header_only_checked_on_first_token() {
        let rows = parse_resource_rows("pod-NAME 1/1 Running");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn all_namespaces_header_reads_as_row() {
        let output = "NAMESPACE   NAME    READY   STATUS    RESTARTS   AGE\n\
                      staging     api-0   1/1     Running   0          1h\n";
        let rows = parse_resource_rows(output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, ResourceStatus::new("NAMESPACE", "READY"));
        assert_eq!(rows[1].status, ResourceStatus::new("staging", "1/1"));
    }

    // ── is_creation ──────────────────────────────────────────────

    #[test]
    fn creation_verbs() {
        assert!(is_creation(&cmd("kubectl apply -f x.yaml")));
        assert!(is_creation(&cmd("kubectl create namespace ns1")));
        assert!(!is_creation(&cmd("kubectl get pods")));
        assert!(!is_creation(&cmd("kubectl delete pod web-1")));
        assert!(!is_creation(&cmd("kubectl")));
    }

    // ── extract_namespace ────────────────────────────────────────

    #[test]
    fn namespace_short_flag() {
        assert_eq!(
            extract_namespace(&cmd("kubectl get pods -n staging")).as_deref(),
            Some("staging")
        );
    }

    #[test]
    fn namespace_long_flag() {
        assert_eq!(
            extract_namespace(&cmd("kubectl get pods --namespace prod -o wide")).as_deref(),
            Some("prod")
        );
        assert_eq!(
            extract_namespace(&cmd("kubectl get pods --namespace=qa")).as_deref(),
            Some("qa")
        );
    }

    #[test]
    fn namespace_absent() {
        assert!(extract_namespace(&cmd("kubectl get pods")).is_none());
        assert!(extract_namespace(&cmd("kubectl get pods -n")).is_none());
        assert!(extract_namespace(&cmd("kubectl get pods --namespace=")).is_none());
    }

    #[test]
    fn first_namespace_flag_wins() {
        assert_eq!(
            extract_namespace(&cmd("kubectl get pods -n a --namespace b")).as_deref(),
            Some("a")
        );
    }

    // ── is_creation_line ─────────────────────────────────────────

    #[test]
    fn creation_lines() {
        assert!(is_creation_line("namespace/ns1 created"));
        assert!(is_creation_line("deployment.apps/web created"));
        assert!(is_creation_line("configmap/settings configured"));
        assert!(!is_creation_line("error: no objects passed to apply"));
        assert!(!is_creation_line("  pod/p1 created"));
    }
}
