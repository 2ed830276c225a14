//! Naming-convention rule: a variable holding a render result must use one
//! of the conventional names, so helper queries read the same way across
//! the suite.

use testlint_core::classify::is_render_call;
use testlint_core::constants::{RENDER_FUNCTIONS, RENDER_RESULT_NAMES};
use testlint_core::{NodeData, NodeId, NodeKind, RuleCtx, SpecifierBinding, VisitorTable};

pub const RULE_ID: &str = "render-result-naming";

pub fn visitors() -> VisitorTable {
    let mut table = VisitorTable::new();
    table.on(NodeKind::VariableDeclarator, check_declarator);
    table
}

pub fn message(data: Option<&str>) -> String {
    let name = data.unwrap_or("this variable");
    format!(
        "`{}` is not a conventional name for a render result (expected one of: {})",
        name,
        RENDER_RESULT_NAMES.join(", ")
    )
}

fn check_declarator(ctx: &mut RuleCtx<'_>, id: NodeId) {
    let tree = ctx.tree();
    let NodeData::VariableDeclarator { id: binding, init: Some(init) } = &tree.node(id).data else {
        return;
    };

    // `const view = await render(...)` binds the awaited value
    let init = match &tree.node(*init).data {
        NodeData::AwaitExpression { argument } => *argument,
        _ => *init,
    };
    if !is_tracked_render_call(ctx, init) {
        return;
    }

    // Destructuring the render result is always acceptable
    let Some(name) = tree.ident_name(*binding) else {
        return;
    };
    if !RENDER_RESULT_NAMES.contains(&name) {
        ctx.report(*binding, RULE_ID, Some(name.to_string()));
    }
}

/// True when `id` calls the render utility as it is actually bound in this
/// file: through the recorded import's specifier when one resolves, by
/// conventional name otherwise.
fn is_tracked_render_call(ctx: &RuleCtx<'_>, id: NodeId) -> bool {
    let tree = ctx.tree();
    match ctx.resolve_specifier("render") {
        Some(SpecifierBinding::Named(local) | SpecifierBinding::DestructuredKey(local)) => {
            let Some(local_name) = tree.ident_name(local) else {
                return false;
            };
            is_render_call(tree, id, &[local_name])
        }
        Some(SpecifierBinding::Namespace(ns) | SpecifierBinding::WholeModule(ns)) => {
            // The utility is only reachable as `alias.render(...)`
            let NodeData::CallExpression { callee, .. } = &tree.node(id).data else {
                return false;
            };
            let NodeData::MemberExpression { object, property } = &tree.node(*callee).data else {
                return false;
            };
            tree.ident_name(*property) == Some("render")
                && tree.ident_name(*object) == tree.ident_name(ns)
        }
        None => is_render_call(tree, id, RENDER_FUNCTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testlint_core::{Diagnostic, Settings, SourceType, parse_source, run_pass};

    fn check(src: &str, filename: &str) -> Vec<Diagnostic> {
        let tree = parse_source(src, SourceType::default()).unwrap();
        run_pass(&tree, filename, &Settings::default(), visitors())
    }

    #[test]
    fn test_reports_unconventional_name() {
        let diags = check(
            "import { render } from '@testing-library/react';\n\
             const wrapper = render(App);",
            "widget.test.ts",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].data.as_deref(), Some("wrapper"));
    }

    #[test]
    fn test_accepts_conventional_names() {
        let diags = check(
            "import { render } from '@testing-library/react';\n\
             const view = render(App);\n\
             const utils = render(Other);",
            "widget.test.ts",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_accepts_destructured_result() {
        let diags = check(
            "import { render } from '@testing-library/react';\n\
             const { getByText } = render(App);",
            "widget.test.ts",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_follows_aliased_import() {
        let diags = check(
            "import { render as doRender } from '@testing-library/react';\n\
             const wrapper = doRender(App);",
            "widget.test.ts",
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_alias_means_original_name_is_not_render() {
        let diags = check(
            "import { render as doRender } from '@testing-library/react';\n\
             const wrapper = render(App);",
            "widget.test.ts",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_follows_namespace_import() {
        let diags = check(
            "import * as rtl from '@testing-library/react';\n\
             const wrapper = rtl.render(App);",
            "widget.test.ts",
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_awaited_render_still_checked() {
        let diags = check(
            "import { render } from '@testing-library/react';\n\
             async function setup() { const wrapper = await render(App); }",
            "widget.test.ts",
        );
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_filename_gate_applies() {
        let diags = check(
            "import { render } from '@testing-library/react';\n\
             const wrapper = render(App);",
            "widget.ts",
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_message_interpolates_name() {
        assert!(message(Some("wrapper")).contains("`wrapper`"));
    }
}
