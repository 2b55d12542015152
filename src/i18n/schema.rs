//! Language schema: single source of truth for every translatable string.
//!
//! The schema is a tree of groups and leaves. Each leaf is one editable bot
//! response and declares the `{placeholder}` names its text must contain. The
//! compiled-in structure is built once on first access and stays immutable.

use crate::i18n::FieldKey;
use std::sync::OnceLock;

/// A translatable leaf: its starting value and the placeholders it requires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeafSpec {
    /// Value the field holds before the user edits it
    pub default_value: String,

    /// Placeholder names in declaration order, without braces (e.g. `"action"`)
    pub allowed_placeholders: Vec<String>,
}

impl LeafSpec {
    /// Create a leaf spec. Repeated placeholder names are kept once, in
    /// first-declared order.
    pub fn new<I, S>(default_value: impl Into<String>, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed_placeholders: Vec<String> = Vec::new();
        for name in placeholders {
            let name = name.into();
            if !allowed_placeholders.contains(&name) {
                allowed_placeholders.push(name);
            }
        }
        Self {
            default_value: default_value.into(),
            allowed_placeholders,
        }
    }
}

/// A node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Named children, traversed in declaration order
    Group(Vec<(String, SchemaNode)>),

    /// A single editable string
    Leaf(LeafSpec),
}

impl SchemaNode {
    /// Build a group from `(name, child)` pairs.
    pub fn group<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        SchemaNode::Group(
            children
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Build a leaf with an empty default value.
    pub fn leaf(placeholders: &[&str]) -> Self {
        SchemaNode::Leaf(LeafSpec::new("", placeholders.iter().copied()))
    }

    /// Build a leaf with a default value.
    pub fn leaf_with_default(default_value: &str, placeholders: &[&str]) -> Self {
        SchemaNode::Leaf(LeafSpec::new(default_value, placeholders.iter().copied()))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SchemaNode::Leaf(_))
    }

    /// Children of a group; a leaf has none.
    pub fn children(&self) -> &[(String, SchemaNode)] {
        match self {
            SchemaNode::Group(children) => children,
            SchemaNode::Leaf(_) => &[],
        }
    }

    /// Find the node at `key`, relative to this node.
    pub fn get(&self, key: &FieldKey) -> Option<&SchemaNode> {
        key.segments().iter().try_fold(self, |node, segment| {
            node.children()
                .iter()
                .find(|(name, _)| name == segment)
                .map(|(_, child)| child)
        })
    }

    /// Find the leaf spec at `key`, if `key` addresses a leaf.
    pub fn leaf_at(&self, key: &FieldKey) -> Option<&LeafSpec> {
        match self.get(key)? {
            SchemaNode::Leaf(spec) => Some(spec),
            SchemaNode::Group(_) => None,
        }
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            SchemaNode::Leaf(_) => 1,
            SchemaNode::Group(children) => children.iter().map(|(_, c)| c.leaf_count()).sum(),
        }
    }
}

/// The compiled-in language file schema.
pub struct LanguageSchema {
    root: SchemaNode,
}

/// Global schema instance (initialized lazily)
static SCHEMA: OnceLock<LanguageSchema> = OnceLock::new();

impl LanguageSchema {
    /// Get the global schema instance.
    pub fn get() -> &'static LanguageSchema {
        SCHEMA.get_or_init(|| LanguageSchema {
            root: default_structure(),
        })
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Names of the top-level entries, in declaration order.
    pub fn top_level_names(&self) -> Vec<&str> {
        self.root
            .children()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Structure of a bot language file.
///
/// Mirrors the locale files the bot loads: plain responses at the top, then one
/// group per command, then the help texts.
fn default_structure() -> SchemaNode {
    use SchemaNode as N;

    let crud_group = |extra: Vec<(&'static str, SchemaNode)>| {
        let mut children = vec![
            ("no_args", N::leaf(&[])),
            ("invalid_action", N::leaf(&[])),
            ("list_empty", N::leaf(&[])),
            ("list_header", N::leaf(&[])),
        ];
        children.extend(extra);
        N::group(children)
    };

    N::group([
        ("lang_code", N::leaf(&[])),
        ("error", N::leaf(&[])),
        ("no_access", N::leaf(&[])),
        (
            "word",
            crud_group(vec![
                ("cleared", N::leaf(&[])),
                ("too_short", N::leaf(&["action"])),
                ("ban_banned", N::leaf(&["words"])),
                ("banned_success", N::leaf(&["words"])),
                ("already_banned", N::leaf(&["words"])),
                ("unban_not_banned", N::leaf(&["words"])),
                ("unbanned_success", N::leaf(&["words"])),
                ("already_unbanned", N::leaf(&["words"])),
            ]),
        ),
        (
            "mod",
            crud_group(vec![
                ("add_superadmin", N::leaf(&[])),
                ("add_already", N::leaf(&[])),
                ("add_success", N::leaf(&["user"])),
                ("delete_superadmin", N::leaf(&[])),
                ("delete_success", N::leaf(&["user"])),
                ("reply", N::leaf(&[])),
            ]),
        ),
        (
            "template",
            crud_group(vec![
                ("list_item", N::leaf(&["template_id", "template"])),
                ("add_no_text", N::leaf(&[])),
                ("add_success", N::leaf(&[])),
                ("remove_no_id", N::leaf(&[])),
                ("remove_success", N::leaf(&[])),
                ("remove_value_error", N::leaf(&[])),
            ]),
        ),
        (
            "messages",
            N::group([
                ("recent", N::leaf(&[])),
                ("recent_item", N::leaf(&["user", "message"])),
                ("recent_empty", N::leaf(&[])),
            ]),
        ),
        (
            "delete",
            N::group([
                ("show", N::leaf(&["current"])),
                ("invalid_action", N::leaf(&[])),
                ("switch", N::leaf(&["value"])),
            ]),
        ),
        (
            "locale",
            N::group([
                ("no_args", N::leaf(&[])),
                ("invalid_action", N::leaf(&[])),
                ("list_empty", N::leaf(&[])),
                ("list", N::leaf(&[])),
                ("current_empty", N::leaf(&[])),
                ("current", N::leaf(&["locale"])),
                ("set_no_locale", N::leaf(&[])),
                ("set_invalid_locale", N::leaf(&["locale"])),
                ("set", N::leaf(&["locale"])),
            ]),
        ),
        (
            "statistics",
            N::group([
                ("format", N::leaf(&[])),
                ("header", N::leaf(&["date"])),
                ("users_header", N::leaf(&[])),
                ("users_item", N::leaf(&["id", "user", "count"])),
                ("words_header", N::leaf(&[])),
                ("words_item", N::leaf(&["id", "word", "count"])),
                ("most_banned", N::leaf(&["message"])),
                ("empty", N::leaf(&[])),
            ]),
        ),
        (
            "bot_add",
            N::group([("no_new", N::leaf(&[])), ("welcome", N::leaf(&[]))]),
        ),
        ("help", help_structure()),
    ])
}

fn help_structure() -> SchemaNode {
    use SchemaNode as N;

    const TEMPLATE: &[&str] = &["help_template"];
    const TEMPLATE_EX: &[&str] = &["help_template", "help_ex"];

    let help_short = N::group(
        [
            "header",
            "word_header",
            "word_ban",
            "word_unban",
            "word_list",
            "word_clear",
            "mod_header",
            "mod_add",
            "mod_delete",
            "mod_list",
            "template_header",
            "template_add",
            "template_delete",
            "template_list",
            "locale_header",
            "locale_list",
            "locale_current",
            "locale_set",
            "other_header",
            "other_messages",
            "other_delete",
            "other_statistics",
            "other_help",
        ]
        .map(|name| (name, N::leaf(&[]))),
    );

    let help_texts = N::group([
        (
            "word",
            N::group([
                ("none", N::leaf(TEMPLATE)),
                ("ban", N::leaf(TEMPLATE_EX)),
                ("unban", N::leaf(TEMPLATE_EX)),
                ("list", N::leaf(TEMPLATE)),
                ("clear", N::leaf(TEMPLATE)),
            ]),
        ),
        (
            "mod",
            N::group([
                ("none", N::leaf(TEMPLATE)),
                ("add", N::leaf(TEMPLATE_EX)),
                ("delete", N::leaf(TEMPLATE_EX)),
                ("list", N::leaf(TEMPLATE)),
            ]),
        ),
        (
            "template",
            N::group([
                ("none", N::leaf(TEMPLATE)),
                ("add", N::leaf(TEMPLATE_EX)),
                ("delete", N::leaf(TEMPLATE_EX)),
                ("list", N::leaf(TEMPLATE)),
            ]),
        ),
        (
            "locale",
            N::group([
                ("none", N::leaf(TEMPLATE)),
                ("list", N::leaf(TEMPLATE)),
                ("current", N::leaf(TEMPLATE)),
                ("set", N::leaf(TEMPLATE_EX)),
            ]),
        ),
        (
            "help",
            N::group([("none", N::leaf(TEMPLATE_EX)), ("help", N::leaf(&[]))]),
        ),
        ("messages", N::leaf(TEMPLATE_EX)),
        ("delete", N::leaf(TEMPLATE_EX)),
        ("statistics", N::leaf(TEMPLATE_EX)),
    ]);

    N::group([("help_short", help_short), ("help_texts", help_texts)])
}
