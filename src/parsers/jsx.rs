//! Component extraction shared by the JavaScript and TypeScript grammars.
//!
//! Works on the tree-sitter syntax tree, never on raw text, so tags inside
//! comments or string literals cannot produce references:
//!
//! - definitions come from top-level declarations (`function`, `class`,
//!   `const X = ...`), optionally wrapped in `export` / `export default`
//! - references come from JSX tags and `createElement`-style calls
//! - imports only annotate references with an origin hint

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Node as TSNode, Tree};

use super::common::{
    extract_text, find_child_by_kind, has_child_kind, normalize_path,
    string_literal,
};
use super::ExtractionResult;
use crate::config::ComponentPattern;
use crate::core::Origin;

const FUNCTION_KINDS: &[&str] = &[
    "arrow_function",
    "function",
    "function_expression",
    "generator_function",
];

/// Calls that turn their first argument into a component.
const COMPONENT_WRAPPERS: &[&str] = &["memo", "forwardRef", "lazy"];

/// Callee names whose first argument is the rendered component.
const ELEMENT_FACTORIES: &[&str] = &["createElement", "jsx", "jsxs", "jsxDEV", "_jsx", "_jsxs"];

#[derive(Debug, Clone)]
struct ImportBinding {
    imported: String,
    origin: Origin,
}

struct PendingReference {
    name: String,
    origin: Origin,
    line_number: usize,
}

struct FileContext<'s> {
    source: &'s [u8],
    file_path: &'s Path,
    imports: HashMap<String, ImportBinding>,
    result: ExtractionResult,
    /// References made outside any component declaration.
    pending: Vec<PendingReference>,
    /// Target of `export default Name;`.
    default_name: Option<String>,
}

pub struct ComponentExtractor<'p> {
    pattern: &'p ComponentPattern,
}

impl<'p> ComponentExtractor<'p> {
    pub fn new(pattern: &'p ComponentPattern) -> Self {
        Self { pattern }
    }

    pub fn extract(&self, tree: &Tree, source: &str, file_path: &Path) -> ExtractionResult {
        let root = tree.root_node();
        let source = source.as_bytes();

        let mut ctx = FileContext {
            source,
            file_path,
            imports: collect_imports(&root, source, file_path),
            result: ExtractionResult::new(file_path),
            pending: Vec::new(),
            default_name: None,
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            self.visit_top_level(&child, false, &mut ctx);
        }

        if let Some(name) = ctx.default_name.take() {
            if ctx.result.defines(&name) {
                ctx.result.define(&name, 0, true);
            }
        }
        self.attribute_pending(&mut ctx);
        ctx.result
    }

    fn visit_top_level(&self, node: &TSNode, default_export: bool, ctx: &mut FileContext) {
        match node.kind() {
            "comment" | "import_statement" => {}
            "export_statement" => {
                let is_default = has_child_kind(node, "default");
                if let Some(declaration) = node.child_by_field_name("declaration") {
                    self.visit_top_level(&declaration, is_default, ctx);
                } else if let Some(value) = node.child_by_field_name("value") {
                    self.visit_default_value(&value, is_default, ctx);
                }
            }
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration" => {
                let source = ctx.source;
                let name = node
                    .child_by_field_name("name")
                    .map(|name| extract_text(&name, source))
                    .filter(|name| self.pattern.matches(name));
                match name {
                    Some(name) => self.define_component(name, node, default_export, ctx),
                    None => self.collect_references(node, None, ctx),
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = node.walk();
                for declarator in node.named_children(&mut cursor) {
                    if declarator.kind() == "variable_declarator" {
                        self.visit_declarator(&declarator, default_export, ctx);
                    }
                }
            }
            _ => self.collect_references(node, None, ctx),
        }
    }

    fn visit_declarator(&self, declarator: &TSNode, default_export: bool, ctx: &mut FileContext) {
        let Some(value) = declarator.child_by_field_name("value") else {
            return;
        };
        let source = ctx.source;
        let name = declarator
            .child_by_field_name("name")
            .filter(|name| name.kind() == "identifier")
            .map(|name| extract_text(&name, source))
            .filter(|name| self.pattern.matches(name));

        match name {
            Some(name) if self.is_component_value(&value, source) => {
                self.define_component(name, &value, default_export, ctx)
            }
            _ => self.collect_references(&value, None, ctx),
        }
    }

    /// `export default <expression>`: anonymous components take the file's name.
    fn visit_default_value(&self, value: &TSNode, is_default: bool, ctx: &mut FileContext) {
        let value = unwrap_expression(*value);
        let source = ctx.source;
        if is_default && value.kind() == "identifier" {
            ctx.default_name = Some(extract_text(&value, source).to_string());
            return;
        }
        if !is_default || !self.is_component_value(&value, source) {
            self.collect_references(&value, None, ctx);
            return;
        }

        let declared = value
            .child_by_field_name("name")
            .map(|name| extract_text(&name, source))
            .filter(|name| self.pattern.matches(name));
        let name = declared
            .map(str::to_string)
            .or_else(|| self.file_component_name(ctx.file_path));

        match name {
            Some(name) => self.define_component(&name, &value, true, ctx),
            None => self.collect_references(&value, None, ctx),
        }
    }

    fn define_component(&self, name: &str, body: &TSNode, default_export: bool, ctx: &mut FileContext) {
        let line_number = body.start_position().row + 1;
        ctx.result.define(name, line_number, default_export);
        self.collect_references(body, Some(name), ctx);
    }

    fn is_component_value(&self, value: &TSNode, source: &[u8]) -> bool {
        let value = unwrap_expression(*value);
        match value.kind() {
            "class" => true,
            kind if FUNCTION_KINDS.contains(&kind) => true,
            "call_expression" => {
                let callee = value
                    .child_by_field_name("function")
                    .map(|callee| extract_text(&callee, source))
                    .unwrap_or("");
                // styled.div`...`, styled(Button)`...`
                if callee.starts_with("styled") {
                    return true;
                }
                // memo(() => ...), React.forwardRef(function ...), memo(Card)
                let wrapper = callee.rsplit('.').next().unwrap_or(callee);
                if !COMPONENT_WRAPPERS.contains(&wrapper) {
                    return false;
                }
                first_argument(&value).is_some_and(|arg| {
                    (arg.kind() == "identifier" && self.pattern.matches(extract_text(&arg, source)))
                        || self.is_component_value(&arg, source)
                })
            }
            _ => false,
        }
    }

    /// Walks `node` in source order, recording every component usage.
    fn collect_references(&self, node: &TSNode, from: Option<&str>, ctx: &mut FileContext) {
        let source = ctx.source;
        let mut stack = vec![*node];
        while let Some(current) = stack.pop() {
            match current.kind() {
                "jsx_opening_element" | "jsx_self_closing_element" => {
                    let tag = current
                        .child_by_field_name("name")
                        .or_else(|| current.named_child(0))
                        .map(|name| extract_text(&name, source))
                        .unwrap_or("");
                    self.record_usage(tag, &current, from, ctx);
                }
                "call_expression" => {
                    if let Some(target) = element_factory_target(&current, source) {
                        self.record_usage(target, &current, from, ctx);
                    }
                }
                _ => {}
            }

            let mut cursor = current.walk();
            let children: Vec<TSNode> = current.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    fn record_usage(&self, tag: &str, node: &TSNode, from: Option<&str>, ctx: &mut FileContext) {
        // <ns:tag> is an XML namespace, never a component
        if tag.contains(':') {
            return;
        }
        let Some(head) = tag.split('.').next().map(str::trim) else {
            return;
        };
        if !self.pattern.matches(head) {
            return;
        }

        let (name, origin) = match ctx.imports.get(head) {
            Some(binding) => (binding.imported.clone(), binding.origin.clone()),
            None => (head.to_string(), Origin::Unknown),
        };
        let line_number = node.start_position().row + 1;

        match from {
            Some(from) => ctx.result.reference(from, &name, origin, line_number),
            None => ctx.pending.push(PendingReference {
                name,
                origin,
                line_number,
            }),
        }
    }

    /// Hands module-level usages to the file's primary component.
    fn attribute_pending(&self, ctx: &mut FileContext) {
        if ctx.pending.is_empty() {
            return;
        }

        let declared = ctx
            .result
            .definitions
            .iter()
            .find(|d| d.default_export)
            .or_else(|| ctx.result.definitions.first())
            .map(|d| d.name.clone());
        let primary = match declared {
            Some(name) => Some(name),
            None => {
                let name = self.file_component_name(ctx.file_path);
                if let Some(name) = &name {
                    ctx.result.define(name, 1, false);
                }
                name
            }
        };

        let Some(primary) = primary else {
            debug!(
                file = %ctx.file_path.display(),
                count = ctx.pending.len(),
                "usages outside any component dropped"
            );
            return;
        };

        for pending in ctx.pending.drain(..) {
            ctx.result
                .reference(&primary, &pending.name, pending.origin, pending.line_number);
        }
    }

    /// Component name implied by the file path: the stem, or the directory for
    /// `index` files.
    fn file_component_name(&self, file_path: &Path) -> Option<String> {
        let stem = file_path.file_stem()?.to_str()?;
        let name = if stem == "index" {
            file_path.parent()?.file_name()?.to_str()?
        } else {
            stem
        };
        self.pattern.matches(name).then(|| name.to_string())
    }
}

/// Strips parentheses and TypeScript `as` / `satisfies` wrappers.
fn unwrap_expression(node: TSNode) -> TSNode {
    let mut current = node;
    while matches!(
        current.kind(),
        "parenthesized_expression" | "as_expression" | "satisfies_expression"
    ) {
        match current.named_child(0) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

fn first_argument<'t>(call: &TSNode<'t>) -> Option<TSNode<'t>> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|arg| arg.kind() != "comment");
    first
}

/// For `React.createElement(Foo, ...)` and friends, the text of `Foo`.
fn element_factory_target<'s>(call: &TSNode, source: &'s [u8]) -> Option<&'s str> {
    let callee = extract_text(&call.child_by_field_name("function")?, source);
    let callee_name = callee.rsplit('.').next()?;
    if !ELEMENT_FACTORIES.contains(&callee_name) {
        return None;
    }

    let first = first_argument(call)?;
    matches!(first.kind(), "identifier" | "member_expression")
        .then(|| extract_text(&first, source))
}

fn collect_imports(root: &TSNode, source: &[u8], file_path: &Path) -> HashMap<String, ImportBinding> {
    let mut imports = HashMap::new();
    let mut cursor = root.walk();

    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "import_statement" => {
                let Some(module) = child.child_by_field_name("source") else {
                    continue;
                };
                let origin = classify_import(&string_literal(&module, source), file_path);
                if let Some(clause) = find_child_by_kind(&child, "import_clause") {
                    bind_import_clause(&clause, source, &origin, &mut imports);
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut declarators = child.walk();
                for declarator in child.named_children(&mut declarators) {
                    if declarator.kind() == "variable_declarator" {
                        bind_require(&declarator, source, file_path, &mut imports);
                    }
                }
            }
            _ => {}
        }
    }

    imports
}

fn bind_import_clause(
    clause: &TSNode,
    source: &[u8],
    origin: &Origin,
    imports: &mut HashMap<String, ImportBinding>,
) {
    let mut bind = |local: &str, imported: &str| {
        let imported = if imported == "default" { local } else { imported };
        imports.insert(
            local.to_string(),
            ImportBinding {
                imported: imported.to_string(),
                origin: origin.clone(),
            },
        );
    };

    let mut cursor = clause.walk();
    for part in clause.named_children(&mut cursor) {
        match part.kind() {
            "identifier" => {
                let local = extract_text(&part, source);
                bind(local, local);
            }
            "namespace_import" => {
                if let Some(name) = find_child_by_kind(&part, "identifier") {
                    let local = extract_text(&name, source);
                    bind(local, local);
                }
            }
            "named_imports" => {
                let mut specifiers = part.walk();
                for specifier in part.named_children(&mut specifiers) {
                    if specifier.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(name) = specifier.child_by_field_name("name") else {
                        continue;
                    };
                    let imported = extract_text(&name, source);
                    let local = specifier
                        .child_by_field_name("alias")
                        .map(|alias| extract_text(&alias, source))
                        .unwrap_or(imported);
                    bind(local, imported);
                }
            }
            _ => {}
        }
    }
}

/// `const X = require('pkg')` and `const { A, B } = require('pkg')`.
fn bind_require(
    declarator: &TSNode,
    source: &[u8],
    file_path: &Path,
    imports: &mut HashMap<String, ImportBinding>,
) {
    let Some(value) = declarator.child_by_field_name("value") else {
        return;
    };
    if value.kind() != "call_expression" {
        return;
    }
    let is_require = value
        .child_by_field_name("function")
        .is_some_and(|callee| extract_text(&callee, source) == "require");
    if !is_require {
        return;
    }
    let Some(module) = value
        .child_by_field_name("arguments")
        .and_then(|args| find_child_by_kind(&args, "string"))
    else {
        return;
    };
    let origin = classify_import(&string_literal(&module, source), file_path);

    let Some(pattern) = declarator.child_by_field_name("name") else {
        return;
    };
    let mut bind = |local: &str, imported: &str| {
        imports.insert(
            local.to_string(),
            ImportBinding {
                imported: imported.to_string(),
                origin: origin.clone(),
            },
        );
    };

    match pattern.kind() {
        "identifier" => {
            let local = extract_text(&pattern, source);
            bind(local, local);
        }
        "object_pattern" => {
            let mut cursor = pattern.walk();
            for property in pattern.named_children(&mut cursor) {
                match property.kind() {
                    "shorthand_property_identifier_pattern" => {
                        let local = extract_text(&property, source);
                        bind(local, local);
                    }
                    "pair_pattern" => {
                        let key = property.child_by_field_name("key");
                        let value = property.child_by_field_name("value");
                        if let (Some(key), Some(value)) = (key, value) {
                            bind(extract_text(&value, source), extract_text(&key, source));
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Origin implied by an import specifier.
///
/// Relative specifiers resolve against the importing file's directory;
/// `@/` and `~/` are treated as project root aliases. Everything else names a
/// package, keeping the scope for `@scope/pkg` specifiers.
pub fn classify_import(specifier: &str, file_path: &Path) -> Origin {
    if specifier.starts_with('.') {
        let base = file_path.parent().unwrap_or_else(|| Path::new(""));
        return Origin::ProjectFile(normalize_path(&base.join(specifier)));
    }
    if let Some(rest) = specifier
        .strip_prefix("@/")
        .or_else(|| specifier.strip_prefix("~/"))
    {
        return Origin::ProjectFile(normalize_path(Path::new(rest)));
    }
    if specifier.starts_with('/') {
        return Origin::ProjectFile(PathBuf::from(specifier));
    }

    let mut segments = specifier.split('/');
    let package = match (segments.next(), segments.next()) {
        (Some(scope), Some(name)) if scope.starts_with('@') => format!("{scope}/{name}"),
        (Some(name), _) => name.to_string(),
        (None, _) => specifier.to_string(),
    };
    Origin::ExternalPackage(package)
}
