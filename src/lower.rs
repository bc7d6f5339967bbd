//! Lowering of form documents into the node taxonomy
//!
//! `UiDsl` is flat: fields and actions. The node tree is what the validator
//! checks against the registry. Lowering builds `page › section › body` where
//! the body shape follows the scaffold. Ids are derived from the document
//! fingerprint so the same document always lowers to the same tree.

use serde_json::{json, Value};

use crate::cache::fingerprint;
use crate::codegen::input_type;
use crate::dsl::{Action, ActionType, Field, FieldComponent, Scaffold, UiDsl, ValidationRule};
use crate::node::{
    BlockNode, ComponentNode, Direction, GridNode, Node, NodeBase, NodeId, PageNode,
    SectionNode, StackNode, TwoColumnNode,
};

struct IdSource {
    seed: String,
}

impl IdSource {
    fn id(&self, key: &str) -> NodeId {
        NodeId::derived(&format!("{}/{}", self.seed, key))
    }
}

pub fn lower_to_page(dsl: &UiDsl) -> Node {
    let ids = IdSource {
        seed: fingerprint(dsl),
    };

    let fields: Vec<Node> = dsl.fields.iter().map(|f| lower_field(f, &ids)).collect();
    let actions: Vec<Node> = dsl.actions.iter().map(|a| lower_action(a, &ids)).collect();

    let mut section_children = Vec::new();
    match dsl.scaffold {
        Some(Scaffold::FormAuth) => {
            let mut card = ComponentNode::new(ids.id("card"), "Card")
                .with_prop("title", dsl.title.clone())
                .with_slot("content", fields);
            if let Some(description) = &dsl.description {
                card = card.with_prop("description", description.clone());
            }
            if !actions.is_empty() {
                card = card.with_slot("footer", actions);
            }
            section_children.push(Node::Component(card));
        }
        scaffold => {
            if let Some(description) = &dsl.description {
                section_children.push(Node::Component(
                    ComponentNode::new(ids.id("description"), "Text")
                        .with_variant("muted")
                        .with_prop("text", description.clone()),
                ));
            }
            section_children.push(field_body(scaffold, fields, &ids));
            if !actions.is_empty() {
                section_children.push(Node::Stack(StackNode {
                    base: NodeBase::named(ids.id("actions"), "actions"),
                    direction: Direction::Horizontal,
                    children: actions,
                }));
            }
        }
    }

    let section = Node::Section(SectionNode {
        base: NodeBase::named(ids.id("section"), "main"),
        title: Some(dsl.title.clone()),
        payload: None,
        children: section_children,
    });

    tracing::trace!(doc_type = dsl.doc_type.as_str(), "lowered document to page");
    Node::Page(PageNode {
        base: NodeBase::named(ids.id("page"), dsl.doc_type.as_str()),
        title: Some(dsl.title.clone()),
        data_sources: Vec::new(),
        children: vec![section],
    })
}

fn field_body(scaffold: Option<Scaffold>, fields: Vec<Node>, ids: &IdSource) -> Node {
    match scaffold {
        Some(Scaffold::TwoColumn) => {
            let mut left = fields;
            let right = left.split_off(left.len().div_ceil(2));
            Node::TwoColumn(TwoColumnNode {
                base: NodeBase::named(ids.id("fields"), "fields"),
                ratio: Some("1:1".to_string()),
                children: vec![
                    Node::Block(BlockNode {
                        base: NodeBase::new(ids.id("fields/left")),
                        children: left,
                    }),
                    Node::Block(BlockNode {
                        base: NodeBase::new(ids.id("fields/right")),
                        children: right,
                    }),
                ],
            })
        }
        Some(Scaffold::Dashboard) => Node::Grid(GridNode {
            base: NodeBase::named(ids.id("fields"), "fields"),
            columns: 3,
            children: fields,
        }),
        _ => Node::Stack(StackNode {
            base: NodeBase::named(ids.id("fields"), "fields"),
            direction: Direction::Vertical,
            children: fields,
        }),
    }
}

fn lower_field(field: &Field, ids: &IdSource) -> Node {
    let mut node = ComponentNode::new(ids.id(&field.id), field.component.as_str())
        .with_prop("name", field.name.clone())
        .with_prop("label", field.label.clone());
    node.base.name = Some(field.name.clone());
    node.base.data_ui_id = Some(field.id.clone());

    if let Some(placeholder) = &field.placeholder {
        node = node.with_prop("placeholder", placeholder.clone());
    }
    if let Some(helper) = &field.helper_text {
        node = node.with_prop("helperText", helper.clone());
    }
    if field.is_required() {
        node = node.with_prop("required", true);
    }
    if let Some(default) = &field.default_value {
        node = node.with_prop("defaultValue", default.clone());
    }

    match field.component {
        FieldComponent::Input => {
            node = node.with_prop("type", input_type(&field.name));
            node = with_length_props(node, &field.validation);
            if let Some(pattern) = field.validation.iter().find_map(|r| match r {
                ValidationRule::Pattern { value, .. } => Some(value.clone()),
                _ => None,
            }) {
                node = node.with_prop("pattern", pattern);
            }
        }
        FieldComponent::Textarea => node = with_length_props(node, &field.validation),
        FieldComponent::Select => {
            let options: Vec<Value> = field
                .options
                .iter()
                .map(|o| json!({ "label": o.label, "value": o.value }))
                .collect();
            node = node.with_prop("options", Value::Array(options));
        }
        FieldComponent::Checkbox | FieldComponent::DatePicker | FieldComponent::FileUpload => {}
    }

    Node::Component(node)
}

fn with_length_props(mut node: ComponentNode, rules: &[ValidationRule]) -> ComponentNode {
    for rule in rules {
        match rule {
            ValidationRule::MinLength { value, .. } => node = node.with_prop("minLength", *value),
            ValidationRule::MaxLength { value, .. } => node = node.with_prop("maxLength", *value),
            _ => {}
        }
    }
    node
}

fn lower_action(action: &Action, ids: &IdSource) -> Node {
    let mut node = ComponentNode::new(ids.id(&action.id), "Button")
        .with_variant(action.variant.button_variant())
        .with_prop("label", action.label.clone());
    node.base.data_ui_id = Some(action.id.clone());

    match action.action_type {
        ActionType::Submit => node = node.with_prop("type", "submit"),
        ActionType::Button => node = node.with_prop("type", "button"),
        ActionType::Link => {
            node = node
                .with_variant("link")
                .with_prop("href", action.href.clone().unwrap_or_else(|| "#".to_string()));
        }
    }
    Node::Component(node)
}
