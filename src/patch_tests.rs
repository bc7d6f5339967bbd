//! Patch protocol tests: shape validation, the op vocabulary and the applier seam.

#[cfg(test)]
mod tests {
    use crate::diagnostics::PATCH_VALIDATION_ERROR;
    use crate::node::{ComponentNode, Node, NodeBase, NodeId, StackNode, Direction};
    use crate::patch::{locate_target, validate_patch, Patch, PatchApplier, PatchFailure, PatchOp};
    use crate::registry::{ComponentRegistry, RegistryEntry};
    use crate::validate::validate_tree;
    use serde_json::{json, Value};

    const TARGET: &str = "0b5f9c1e-3c4d-4e8a-9f00-6a1b2c3d4e5f";

    fn paths(patch: Value) -> Vec<String> {
        validate_patch(&patch)
            .diagnostics
            .into_iter()
            .filter_map(|d| {
                assert_eq!(d.code.as_deref(), Some(PATCH_VALIDATION_ERROR));
                d.path
            })
            .collect()
    }

    #[test]
    fn test_well_formed_patch_is_valid() {
        let result = validate_patch(&json!({
            "targetId": TARGET,
            "op": "setProp",
            "args": { "key": "label", "value": "Save" }
        }));
        assert!(result.valid);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_rejects_malformed_target_id() {
        let result = validate_patch(&json!({ "targetId": "not-a-uuid", "op": "setProp", "args": {} }));
        assert!(!result.valid);
        assert_eq!(paths(json!({ "targetId": "not-a-uuid", "op": "setProp", "args": {} })), vec!["/targetId"]);
    }

    #[test]
    fn test_rejects_unknown_op() {
        let patch = json!({ "targetId": TARGET, "op": "invalidOp", "args": {} });
        assert!(!validate_patch(&patch).valid);
        assert_eq!(paths(patch), vec!["/op"]);
    }

    #[test]
    fn test_reports_every_missing_field() {
        assert_eq!(paths(json!({})), vec!["/targetId", "/op", "/args"]);
        assert_eq!(paths(json!({ "targetId": 7, "op": "reorder", "args": [] })), vec!["/targetId", "/args"]);
        assert_eq!(paths(json!([])), vec![""]);
    }

    #[test]
    fn test_op_vocabulary_round_trips_through_strings() {
        for op in PatchOp::ALL {
            assert_eq!(op.as_str().parse::<PatchOp>(), Ok(op));
            assert_eq!(serde_json::to_value(op).unwrap(), json!(op.as_str()));
        }
        assert!("setprop".parse::<PatchOp>().is_err());
    }

    #[test]
    fn test_typed_patch_deserializes() {
        let patch: Patch = serde_json::from_value(json!({
            "targetId": TARGET,
            "op": "toggleVariant",
            "args": { "variant": "outline" }
        }))
        .unwrap();
        assert_eq!(patch.op, PatchOp::ToggleVariant);
        assert_eq!(patch.target_id.to_string(), TARGET);
        assert_eq!(patch.args["variant"], json!("outline"));
    }

    #[test]
    fn test_target_id_parses_from_str() {
        let id: NodeId = TARGET.parse().unwrap();
        assert_eq!(id.to_string(), TARGET);
        assert!("not-a-uuid".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_failure_serializes_camel_case_fields() {
        let id: NodeId = TARGET.parse().unwrap();
        let value = serde_json::to_value(PatchFailure::TargetNotFound { target_id: id }).unwrap();
        assert_eq!(value, json!({ "reason": "targetNotFound", "targetId": TARGET }));
        let back: PatchFailure = serde_json::from_value(value).unwrap();
        assert_eq!(back, PatchFailure::TargetNotFound { target_id: id });
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // APPLIER SEAM
    // ═══════════════════════════════════════════════════════════════════════════════

    /// Minimal host applier supporting `toggleVariant` on component nodes.
    struct VariantApplier<'r> {
        registry: &'r ComponentRegistry,
    }

    fn set_variant(node: &Node, target: NodeId, variant: &str) -> Node {
        match node {
            Node::Component(c) if c.base.id == target => {
                Node::Component(c.clone().with_variant(variant))
            }
            Node::Stack(s) => Node::Stack(StackNode {
                base: s.base.clone(),
                direction: s.direction,
                children: s.children.iter().map(|n| set_variant(n, target, variant)).collect(),
            }),
            other => other.clone(),
        }
    }

    impl PatchApplier for VariantApplier<'_> {
        fn apply(&self, tree: &Node, patch: &Patch) -> Result<Node, PatchFailure> {
            if patch.op != PatchOp::ToggleVariant {
                return Err(PatchFailure::UnsupportedOp { op: patch.op });
            }
            if locate_target(tree, patch).is_none() {
                return Err(PatchFailure::TargetNotFound { target_id: patch.target_id });
            }
            let variant = patch
                .args
                .get("variant")
                .and_then(Value::as_str)
                .ok_or_else(|| PatchFailure::InvalidArgs {
                    message: "variant must be a string".to_string(),
                })?;
            let next = set_variant(tree, patch.target_id, variant);
            let result = validate_tree(&next, self.registry);
            if result.valid {
                Ok(next)
            } else {
                Err(PatchFailure::InvalidResult { diagnostics: result.diagnostics })
            }
        }
    }

    fn tree(button_id: NodeId) -> Node {
        Node::Stack(StackNode {
            base: NodeBase::new(NodeId::new()),
            direction: Direction::Horizontal,
            children: vec![Node::Component(
                ComponentNode::new(button_id, "Button").with_variant("default"),
            )],
        })
    }

    #[test]
    fn test_applier_seam() {
        let registry = ComponentRegistry::new().with_component(
            "Button",
            RegistryEntry::new("button").variants(&["default", "outline"]),
        );
        let applier = VariantApplier { registry: &registry };
        let button_id = NodeId::new();
        let original = tree(button_id);

        let patched = applier
            .apply(&original, &Patch::new(button_id, PatchOp::ToggleVariant).arg("variant", "outline"))
            .unwrap();
        match patched.find(button_id) {
            Some(Node::Component(c)) => assert_eq!(c.variant.as_deref(), Some("outline")),
            other => panic!("target missing: {:?}", other.map(Node::kind)),
        }
        // Input tree untouched.
        match original.find(button_id) {
            Some(Node::Component(c)) => assert_eq!(c.variant.as_deref(), Some("default")),
            _ => unreachable!(),
        }

        let invalid = applier.apply(&original, &Patch::new(button_id, PatchOp::ToggleVariant).arg("variant", "huge"));
        assert!(matches!(invalid, Err(PatchFailure::InvalidResult { .. })));

        let missing = applier.apply(&original, &Patch::new(NodeId::new(), PatchOp::ToggleVariant));
        assert!(matches!(missing, Err(PatchFailure::TargetNotFound { .. })));

        let unsupported = applier.apply(&original, &Patch::new(button_id, PatchOp::RemoveNode));
        assert_eq!(
            unsupported.unwrap_err().to_string(),
            "unsupported op removeNode"
        );
    }
}
