//! Field-list operations over document snapshots.
//!
//! Every operation is a pure function `(snapshot, args) -> snapshot'` built
//! from [`EditOp`]s. Indices that are out of range for the current document
//! are user-input-shape issues, not errors: the operation hands back the
//! input snapshot unchanged. Structural path errors still propagate; they
//! mean the snapshot itself is malformed.

use std::sync::Arc;

use serde_json::json;

use crate::document::{ChoiceOption, DisplayRule, FieldDefinition};
use crate::mutate::{apply, EditOp, PathError};
use crate::node_path;
use crate::tree::DocNode;

const PROPERTIES: &str = "properties";
const OPTIONS: &str = "options";
const SHOW_IF: &str = "showIf";

type OpResult = Result<Arc<DocNode>, PathError>;

/// Append a new field definition with fixed defaults to the end of the list.
pub fn add_field(doc: &Arc<DocNode>) -> OpResult {
    apply(doc, &EditOp::push(node_path![PROPERTIES], default_field()))
}

/// Remove the field at `index`; the entries after it shift down. Out of
/// range is a no-op.
pub fn remove_field(doc: &Arc<DocNode>, index: usize) -> OpResult {
    apply(doc, &EditOp::remove_at(node_path![PROPERTIES], index))
}

/// Turn the selectable-options list of field `index` on or off.
///
/// Turning it on seeds exactly one blank row, so the user always has an
/// editable first entry. Turning it off removes the list entirely: the
/// field goes back to "no options", not "zero options".
pub fn toggle_options(doc: &Arc<DocNode>, index: usize, enabled: bool) -> OpResult {
    toggle_sublist(doc, index, OPTIONS, enabled, blank_option())
}

/// Append a blank option row to field `index`.
pub fn add_option(doc: &Arc<DocNode>, index: usize) -> OpResult {
    push_sublist(doc, index, OPTIONS, blank_option())
}

/// Remove option `opt_index` from field `index`. Out of range is a no-op.
pub fn remove_option(doc: &Arc<DocNode>, index: usize, opt_index: usize) -> OpResult {
    remove_sublist(doc, index, OPTIONS, opt_index)
}

/// Turn the conditional-display rules of field `index` on or off; mirrors
/// [`toggle_options`].
pub fn toggle_rules(doc: &Arc<DocNode>, index: usize, enabled: bool) -> OpResult {
    toggle_sublist(doc, index, SHOW_IF, enabled, blank_rule())
}

/// Append a blank rule row to field `index`.
pub fn add_rule(doc: &Arc<DocNode>, index: usize) -> OpResult {
    push_sublist(doc, index, SHOW_IF, blank_rule())
}

/// Remove rule `rule_index` from field `index`. Out of range is a no-op.
pub fn remove_rule(doc: &Arc<DocNode>, index: usize, rule_index: usize) -> OpResult {
    remove_sublist(doc, index, SHOW_IF, rule_index)
}

/// Number of field definitions in the snapshot.
pub fn field_count(doc: &DocNode) -> usize {
    doc.seq_len(&node_path![PROPERTIES]).unwrap_or(0)
}

fn field_exists(doc: &DocNode, index: usize) -> bool {
    index < field_count(doc)
}

fn toggle_sublist(
    doc: &Arc<DocNode>,
    index: usize,
    list: &str,
    enabled: bool,
    seed_row: DocNode,
) -> OpResult {
    if !field_exists(doc, index) {
        return Ok(Arc::clone(doc));
    }
    let path = node_path![PROPERTIES, index, list];
    if enabled {
        apply(doc, &EditOp::set(path, DocNode::Seq(vec![Arc::new(seed_row)])))
    } else {
        apply(doc, &EditOp::delete(path))
    }
}

fn push_sublist(doc: &Arc<DocNode>, index: usize, list: &str, row: DocNode) -> OpResult {
    if !field_exists(doc, index) {
        return Ok(Arc::clone(doc));
    }
    apply(doc, &EditOp::push(node_path![PROPERTIES, index, list], row))
}

fn remove_sublist(doc: &Arc<DocNode>, index: usize, list: &str, row_index: usize) -> OpResult {
    if !field_exists(doc, index) {
        return Ok(Arc::clone(doc));
    }
    apply(
        doc,
        &EditOp::remove_at(node_path![PROPERTIES, index, list], row_index),
    )
}

fn default_field() -> DocNode {
    DocNode::from_json(json!(FieldDefinition::new_default()))
}

fn blank_option() -> DocNode {
    DocNode::from_json(json!(ChoiceOption::blank()))
}

fn blank_rule() -> DocNode {
    DocNode::from_json(json!(DisplayRule::blank()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConfigDocument;
    use pretty_assertions::assert_eq;

    fn seed() -> Arc<DocNode> {
        ConfigDocument::seed().to_snapshot().unwrap()
    }

    #[test]
    fn add_field_appends_default_entry() {
        let doc = seed();
        let next = add_field(&doc).unwrap();
        assert_eq!(field_count(&next), 3);

        let decoded = ConfigDocument::from_snapshot(&next).unwrap();
        assert_eq!(decoded.properties[2], crate::document::FieldDefinition::new_default());
        // existing entries keep their order
        assert_eq!(decoded.properties[0].key, "apiKey");
        assert_eq!(decoded.properties[1].key, "region");
    }

    #[test]
    fn append_then_remove_last_round_trips() {
        let doc = seed();
        let len = field_count(&doc);
        let round = remove_field(&add_field(&doc).unwrap(), len).unwrap();
        assert_eq!(*round, *doc);
    }

    #[test]
    fn remove_field_out_of_range_is_a_no_op() {
        let doc = seed();
        let unchanged = remove_field(&doc, field_count(&doc)).unwrap();
        assert!(Arc::ptr_eq(&doc, &unchanged));
    }

    #[test]
    fn toggle_options_seeds_one_blank_row_and_clears_to_absent() {
        let doc = seed();
        let on = toggle_options(&doc, 0, true).unwrap();
        let decoded = ConfigDocument::from_snapshot(&on).unwrap();
        assert_eq!(
            decoded.properties[0].options.as_deref(),
            Some([crate::document::ChoiceOption::blank()].as_slice())
        );

        let off = toggle_options(&on, 0, false).unwrap();
        let decoded = ConfigDocument::from_snapshot(&off).unwrap();
        // absent, not an empty list
        assert_eq!(decoded.properties[0].options, None);
    }

    #[test]
    fn toggle_on_out_of_range_field_is_a_no_op() {
        let doc = seed();
        let unchanged = toggle_options(&doc, 9, true).unwrap();
        assert!(Arc::ptr_eq(&doc, &unchanged));
        let unchanged = toggle_rules(&doc, 9, true).unwrap();
        assert!(Arc::ptr_eq(&doc, &unchanged));
    }

    #[test]
    fn rules_scenario_from_seed() {
        // seed -> add a third field
        let doc = add_field(&seed()).unwrap();
        assert_eq!(field_count(&doc), 3);

        // enable rules on field 0: exactly one blank rule
        let doc = toggle_rules(&doc, 0, true).unwrap();
        let decoded = ConfigDocument::from_snapshot(&doc).unwrap();
        assert_eq!(
            decoded.properties[0].show_if.as_deref(),
            Some([DisplayRule::blank()].as_slice())
        );

        // add a second rule, edit it, then drop the first
        let doc = add_rule(&doc, 0).unwrap();
        let doc = apply(
            &doc,
            &EditOp::set(node_path![PROPERTIES, 0usize, SHOW_IF, 1usize, "key"], "region"),
        )
        .unwrap();
        let with_two = ConfigDocument::from_snapshot(&doc).unwrap();
        assert_eq!(with_two.properties[0].show_if.as_ref().unwrap().len(), 2);

        let doc = remove_rule(&doc, 0, 0).unwrap();
        let decoded = ConfigDocument::from_snapshot(&doc).unwrap();
        let rules = decoded.properties[0].show_if.as_ref().unwrap();
        assert_eq!(rules.len(), 1);
        // the survivor is the former second rule
        assert_eq!(rules[0], with_two.properties[0].show_if.as_ref().unwrap()[1]);
    }

    #[test]
    fn option_rows_append_and_remove_with_shift() {
        let doc = toggle_options(&seed(), 1, true).unwrap();
        let doc = add_option(&doc, 1).unwrap();
        let doc = apply(
            &doc,
            &EditOp::set(
                node_path![PROPERTIES, 1usize, OPTIONS, 1usize, "label"],
                "Europe",
            ),
        )
        .unwrap();

        let doc = remove_option(&doc, 1, 0).unwrap();
        let decoded = ConfigDocument::from_snapshot(&doc).unwrap();
        let options = decoded.properties[1].options.as_ref().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Europe");

        // removing past the end leaves the snapshot alone
        let unchanged = remove_option(&doc, 1, 7).unwrap();
        assert!(Arc::ptr_eq(&doc, &unchanged));
    }
}
