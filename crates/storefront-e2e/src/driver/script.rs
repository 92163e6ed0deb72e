//! Selector → JavaScript compilation for script-evaluating drivers.
//!
//! Every generated expression is self-contained: it resolves the selector
//! chain from `document` at evaluation time, so nothing is cached between
//! calls. Strings are embedded as JSON literals, which are valid JavaScript
//! string literals.

use crate::selector::{Selector, Step};

/// Status returned by action scripts when the target index is gone
pub const DETACHED: &str = "detached";

/// Status returned by action scripts on success
pub const OK: &str = "ok";

/// Interaction performed by an action script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction<'a> {
    /// Scroll into view and click
    Click,
    /// Set the value through the native setter and fire input/change
    Fill(&'a str),
    /// Select an option by value and fire change
    Select(&'a str),
}

/// Encode `text` as a JavaScript string literal
#[must_use]
pub fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

const PRELUDE: &str = r"const __desc = (set, css) => {
    const seen = new Set();
    const out = [];
    for (const root of set) {
      for (const el of root.querySelectorAll(css)) {
        if (!seen.has(el)) { seen.add(el); out.push(el); }
      }
    }
    return out.sort((a, b) => a === b ? 0 :
      (a.compareDocumentPosition(b) & Node.DOCUMENT_POSITION_FOLLOWING ? -1 : 1));
  };
  const __name = (el) => (el.getAttribute('aria-label') || el.innerText || el.value || el.textContent || '').trim();";

fn compile_step(step: &Step) -> String {
    match step {
        Step::Css(css) => format!("set = __desc(set, {});", js_string(css)),
        Step::Placeholder(text) => format!(
            "set = __desc(set, '[placeholder]').filter(el => el.getAttribute('placeholder').toLowerCase().includes({}));",
            js_string(&text.to_lowercase())
        ),
        Step::Role { role, name: None } => {
            format!("set = __desc(set, {});", js_string(role.implicit_css()))
        }
        Step::Role {
            role,
            name: Some(name),
        } => format!(
            "set = __desc(set, {}).filter(el => __name(el).toLowerCase().includes({}));",
            js_string(role.implicit_css()),
            js_string(&name.to_lowercase())
        ),
        Step::HasText(text) => format!(
            "set = set.filter(el => (el.textContent || '').includes({}));",
            js_string(text)
        ),
        Step::Nth(index) => format!("set = set.length > {index} ? [set[{index}]] : [];"),
    }
}

/// Statements that leave the resolved elements in `set`
fn resolve_block(selector: &Selector) -> String {
    let mut body = String::from("let set = [document];\n  ");
    for step in selector.steps() {
        body.push_str(&compile_step(step));
        body.push_str("\n  ");
    }
    body
}

/// Expression evaluating to an array of element descriptions
/// (`{visible, enabled, text, value}`), in document order.
#[must_use]
pub fn probe_script(selector: &Selector) -> String {
    format!(
        r"(() => {{
  {PRELUDE}
  {resolve}return set.filter(el => el !== document).map(el => {{
    const style = window.getComputedStyle(el);
    const visible = style.visibility !== 'hidden' &&
      !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    const value = ('value' in el && typeof el.value === 'string') ? el.value : null;
    return {{ visible, enabled: !el.disabled, text: (el.innerText ?? el.textContent ?? '').trim(), value }};
  }});
}})()",
        resolve = resolve_block(selector),
    )
}

/// Expression performing `action` on the `index`th match and returning a
/// status string: [`OK`], [`DETACHED`], or an error description.
#[must_use]
pub fn action_script(selector: &Selector, index: usize, action: &ScriptAction<'_>) -> String {
    let perform = match action {
        ScriptAction::Click => {
            "el.scrollIntoView({ block: 'center' });\n  el.click();".to_string()
        }
        ScriptAction::Fill(text) => format!(
            r"el.focus();
  const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value');
  if (desc && desc.set) {{ desc.set.call(el, {text}); }} else {{ el.value = {text}; }}
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));",
            text = js_string(text)
        ),
        ScriptAction::Select(value) => format!(
            r"if (!el.options || ![...el.options].some(o => o.value === {value})) {{
    return 'no option with value ' + {value};
  }}
  const desc = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value');
  desc.set.call(el, {value});
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));",
            value = js_string(value)
        ),
    };
    format!(
        r"(() => {{
  {PRELUDE}
  {resolve}const el = set.filter(e => e !== document)[{index}];
  if (!el) {{ return {detached}; }}
  {perform}
  return {ok};
}})()",
        resolve = resolve_block(selector),
        detached = js_string(DETACHED),
        ok = js_string(OK),
    )
}
