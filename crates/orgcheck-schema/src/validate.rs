//! # Tree Validation
//!
//! Walks a decoded organization document and checks every branch node
//! against a [`Schema`].
//!
//! ## Algorithm
//!
//! The top-level branch list lives at `OrgContents.Branch`. Each element is
//! validated with [`INITIAL_LINE_HINT`]. For one node, fields are visited in
//! enumeration order:
//!
//! - A sequence or mapping value is descended into with the line hint
//!   advanced by the number of leaf fields already seen at this level.
//! - A leaf value gets exactly one of, in priority order:
//!   1. a type mismatch, if its declared tag rejects it;
//!   2. an exceed finding, if the schema does not declare it;
//!   3. a contribution to this node's missing set, if the node has fewer
//!      own keys than the schema declares.
//!
//! After the walk a non-empty missing set becomes one consolidated
//! diagnostic. The recursive field ([`BRANCH_FIELD`]) is never part of it.
//!
//! ## Run Isolation
//!
//! Each call to [`TreeValidator::validate`] builds a fresh run context and
//! returns it as a [`ValidationReport`]. Nothing is retained between runs.

use indexmap::IndexSet;
use orgcheck_core::{parse_bytes, Diagnostic, Document, DocumentError, Row};
use serde::Serialize;

use crate::schema::{Schema, BRANCH_FIELD};
use crate::tag::matches_type;

/// Path from the document root to the top-level branch list.
pub const ROOT_PATH: [&str; 2] = ["OrgContents", BRANCH_FIELD];

/// Line hint given to each top-level branch.
pub const INITIAL_LINE_HINT: usize = 12;

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    /// Findings from every level of the tree, flattened in walk order.
    pub diagnostics: Vec<Diagnostic>,
    /// True once the run finished. Says nothing about validity.
    pub validated: bool,
}

impl ValidationReport {
    /// True when the run finished without findings.
    pub fn is_clean(&self) -> bool {
        self.validated && self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Message text of every finding, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }
}

/// Mutable state scoped to one run.
#[derive(Debug, Default)]
struct ValidationRun {
    diagnostics: Vec<Diagnostic>,
    validated: bool,
}

impl ValidationRun {
    fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(row = %diagnostic.row, error = %diagnostic.error, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn finish(mut self) -> ValidationReport {
        self.validated = true;
        ValidationReport {
            diagnostics: self.diagnostics,
            validated: self.validated,
        }
    }
}

/// Recursive branch validator bound to one schema.
#[derive(Debug, Clone, Default)]
pub struct TreeValidator {
    schema: Schema,
    line_rows: bool,
}

impl TreeValidator {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            line_rows: false,
        }
    }

    /// Stamp diagnostics with the approximate line hint instead of `n/a`.
    ///
    /// Off by default. The hint counts leaf fields from
    /// [`INITIAL_LINE_HINT`], not real source lines.
    pub fn with_line_rows(mut self, enabled: bool) -> Self {
        self.line_rows = enabled;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate every branch under `OrgContents.Branch`.
    ///
    /// A document without that path, or where it is not a sequence, yields
    /// an empty report that is still marked validated.
    pub fn validate(&self, document: &Document) -> ValidationReport {
        let mut run = ValidationRun::default();

        match document.get_path(&ROOT_PATH).and_then(Document::as_sequence) {
            Some(branches) => {
                for (index, branch) in branches.iter().enumerate() {
                    tracing::trace!(index, node = %self.schema.summarize(branch), "top-level branch");
                    self.validate_node(branch, INITIAL_LINE_HINT, &mut run);
                }
                tracing::info!(
                    branches = branches.len(),
                    diagnostics = run.diagnostics.len(),
                    "validation run complete"
                );
            }
            None => {
                tracing::debug!("no branch sequence at {}; nothing to validate", ROOT_PATH.join("."));
            }
        }

        run.finish()
    }

    /// Decode, parse and validate raw input, absorbing input failures.
    ///
    /// Unreadable or unparseable input is logged and treated as a document
    /// with nothing to validate.
    pub fn validate_source(&self, bytes: &[u8]) -> ValidationReport {
        match self.try_validate_source(bytes) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("input could not be parsed, nothing validated: {e}");
                ValidationRun::default().finish()
            }
        }
    }

    /// Decode, parse and validate raw input.
    ///
    /// # Errors
    ///
    /// Returns the [`DocumentError`] from decoding or parsing.
    pub fn try_validate_source(&self, bytes: &[u8]) -> Result<ValidationReport, DocumentError> {
        let document = parse_bytes(bytes)?;
        Ok(self.validate(&document))
    }

    fn validate_node(&self, node: &Document, line_hint: usize, run: &mut ValidationRun) {
        tracing::trace!(line_hint, kind = node.kind(), keys = node.len(), "validating node");

        let mut leaf_count = 0usize;
        let mut missing: IndexSet<&str> = IndexSet::new();

        for (field, value) in node.entries() {
            if value.is_structured() {
                self.validate_node(value, line_hint + leaf_count, run);
                continue;
            }

            let row = self.row(line_hint + leaf_count);
            leaf_count += 1;

            match self.schema.tag(&field) {
                Some(tag) if !matches_type(value, Some(tag)) => {
                    run.push(Diagnostic {
                        row,
                        ..Diagnostic::type_mismatch(&field, tag)
                    });
                }
                None => {
                    run.push(Diagnostic {
                        row,
                        ..Diagnostic::exceed(&field)
                    });
                }
                Some(_) if node.len() < self.schema.len() => {
                    missing.extend(
                        self.schema
                            .absent_fields(node)
                            .filter(|f| *f != BRANCH_FIELD),
                    );
                }
                Some(_) => {}
            }
        }

        if !missing.is_empty() {
            run.push(Diagnostic {
                row: self.row(line_hint),
                ..Diagnostic::missing(&missing)
            });
        }
    }

    fn row(&self, line: usize) -> Row {
        if self.line_rows {
            Row::Line(line)
        } else {
            Row::NotApplicable
        }
    }
}

/// Validate raw input against the built-in branch schema, absorbing input failures.
pub fn validate_source(bytes: &[u8]) -> ValidationReport {
    TreeValidator::default().validate_source(bytes)
}

/// Validate raw input against the built-in branch schema.
pub fn try_validate_source(bytes: &[u8]) -> Result<ValidationReport, DocumentError> {
    TreeValidator::default().try_validate_source(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgcheck_core::parse_document;

    fn doc(yaml: &str) -> Document {
        parse_document(yaml).unwrap()
    }

    fn run(yaml: &str) -> ValidationReport {
        TreeValidator::default().validate(&doc(yaml))
    }

    const CLEAN_NODE: &str = r#"
OrgContents:
  Branch:
    - Level: 5
      NodeID: N1
      RefNodeID: ~
      NodeName: Root
      DoAAuthlevel: 2
      Branch: []
"#;

    #[test]
    fn clean_tree_has_no_diagnostics() {
        let report = run(CLEAN_NODE);
        assert!(report.validated);
        assert!(report.is_clean(), "{:?}", report.messages());
    }

    #[test]
    fn wrong_type_and_missing_field() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: "5"
      NodeID: N1
      NodeName: Root
      DoAAuthlevel: 2
"#,
        );
        assert_eq!(
            report.messages(),
            vec!["Level Should be number", "Missing attritube RefNodeID"]
        );
    }

    #[test]
    fn extra_field_is_exceed_only() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: 5
      NodeID: N1
      RefNodeID: null
      NodeName: Root
      DoAAuthlevel: 2
      Extra: x
"#,
        );
        assert_eq!(report.messages(), vec!["Exceed attribute 'Extra'"]);
    }

    #[test]
    fn rows_are_not_applicable_by_default() {
        let report = run("OrgContents:\n  Branch:\n    - Level: x\n");
        assert!(report.diagnostics.iter().all(|d| d.row == Row::NotApplicable));
    }

    #[test]
    fn missing_lists_all_absent_fields_once() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - NodeID: N1
      NodeName: Root
"#,
        );
        assert_eq!(
            report.messages(),
            vec!["Missing attritube Level, RefNodeID, DoAAuthlevel"]
        );
    }

    #[test]
    fn missing_not_reported_when_every_leaf_mismatches() {
        let report = run("OrgContents:\n  Branch:\n    - Level: high\n");
        assert_eq!(report.messages(), vec!["Level Should be number"]);
    }

    #[test]
    fn missing_not_reported_when_only_branch_absent() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: 1
      NodeID: N1
      RefNodeID: ~
      NodeName: Leaf
      DoAAuthlevel: 1
"#,
        );
        assert!(report.is_clean(), "{:?}", report.messages());
    }

    #[test]
    fn missing_skipped_when_key_count_reaches_schema_size() {
        // Six keys, one of them extra: the node is not short, so no missing set.
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: 1
      NodeID: N1
      NodeName: Leaf
      DoAAuthlevel: 1
      Owner: a
      Region: b
"#,
        );
        assert_eq!(
            report.messages(),
            vec!["Exceed attribute 'Owner'", "Exceed attribute 'Region'"]
        );
    }

    #[test]
    fn nested_branches_are_flattened_in_walk_order() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: one
      NodeID: N1
      RefNodeID: ~
      NodeName: Root
      DoAAuthlevel: 1
      Branch:
        - Level: 2
          NodeID: 22
          RefNodeID: N1
          NodeName: Mid
          DoAAuthlevel: 1
          Branch:
            - Level: 3
              NodeID: N3
              RefNodeID: N2
              NodeName: false
              DoAAuthlevel: 1
              Branch: []
"#,
        );
        assert_eq!(
            report.messages(),
            vec![
                "Level Should be number",
                "NodeID Should be string",
                "RefNodeID Should be null",
                "RefNodeID Should be null",
                "NodeName Should be string",
            ]
        );
    }

    #[test]
    fn scalar_branch_field_is_a_type_mismatch() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: 1
      NodeID: N1
      RefNodeID: ~
      NodeName: Root
      DoAAuthlevel: 1
      Branch: none
"#,
        );
        assert_eq!(report.messages(), vec!["Branch Should be array"]);
    }

    #[test]
    fn scalar_sequence_items_are_exceed_by_index() {
        let report = run(
            r#"
OrgContents:
  Branch:
    - Level: 1
      NodeID: N1
      RefNodeID: ~
      NodeName: Root
      DoAAuthlevel: 1
      Tags: [a, b]
"#,
        );
        assert_eq!(
            report.messages(),
            vec!["Exceed attribute '0'", "Exceed attribute '1'"]
        );
    }

    #[test]
    fn boolean_tagged_field_never_validates() {
        let schema = Schema::from_fields([
            ("Branch", crate::TypeTag::Array),
            ("Active", crate::TypeTag::Boolean),
        ]);
        let validator = TreeValidator::new(schema);
        let report = validator.validate(&doc(
            "OrgContents:\n  Branch:\n    - Active: true\n      Branch: []\n",
        ));
        assert_eq!(report.messages(), vec!["Active Should be boolean"]);
    }

    #[test]
    fn absent_root_yields_empty_validated_report() {
        for yaml in [
            "Other: 1\n",
            "OrgContents:\n  Name: x\n",
            "OrgContents:\n  Branch: {Level: 1}\n",
            "OrgContents:\n  Branch: text\n",
            "- a\n- b\n",
            "",
        ] {
            let report = run(yaml);
            assert!(report.validated, "not validated for {yaml:?}");
            assert!(report.is_empty(), "diagnostics for {yaml:?}: {:?}", report.messages());
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let validator = TreeValidator::default();
        let document = doc(
            "OrgContents:\n  Branch:\n    - Level: x\n      Extra: 1\n      NodeID: N\n",
        );
        let first = validator.validate(&document);
        let second = validator.validate(&document);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn line_rows_follow_leaf_offsets() {
        let validator = TreeValidator::default().with_line_rows(true);
        let report = validator.validate(&doc(
            r#"
OrgContents:
  Branch:
    - NodeID: N1
      Level: x
      Branch:
        - Extra: 1
          NodeID: N2
"#,
        ));
        let rows: Vec<(Row, &str)> = report
            .diagnostics
            .iter()
            .map(|d| (d.row, d.error.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Row::Line(13), "Level Should be number"),
                (Row::Line(14), "Exceed attribute 'Extra'"),
                (Row::Line(14), "Missing attritube Level, RefNodeID, NodeName, DoAAuthlevel"),
                (Row::Line(12), "Missing attritube RefNodeID, NodeName, DoAAuthlevel"),
            ]
        );
    }

    #[test]
    fn validate_source_absorbs_parse_failures() {
        let report = validate_source(b"OrgContents: [unclosed\n");
        assert!(report.validated);
        assert!(report.is_empty());
        assert!(try_validate_source(b"OrgContents: [unclosed\n").is_err());
    }

    #[test]
    fn validate_source_decodes_bom() {
        let report = validate_source(b"\xEF\xBB\xBFOrgContents:\n  Branch:\n    - Level: x\n");
        assert_eq!(report.messages(), vec!["Level Should be number"]);
    }

    #[test]
    fn report_serializes_for_display() {
        let report = run("OrgContents:\n  Branch:\n    - Level: x\n");
        let json = serde_yaml::to_string(&report).unwrap();
        assert!(json.contains("validated: true"));
        assert!(json.contains("Level Should be number"));
    }
}
