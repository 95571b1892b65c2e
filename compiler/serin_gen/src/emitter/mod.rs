//! Companion source emission.
//!
//! Renders a [`ClassAnalysisResult`] as a partial class that the host
//! compiler merges with the user's declaration. Rendering is purely textual:
//! no semantic queries happen here, and the same analysis always renders to
//! the same bytes.
//!
//! Layout, in order:
//!
//! 1. `// <auto-generated/>` header and using directives
//! 2. namespace and containing type blocks
//! 3. the partial class header, adding the callback interface
//! 4. one backing field per shape
//! 5. the before-serialize hook (empty)
//! 6. the after-deserialize hook, or the override of a base companion's
//!    chained hook
//! 7. `Repopulate*` helpers for readonly lists
//! 8. `InstantiateInterface` overloads
//! 9. closing braces

mod writer;

use rustc_hash::FxHashSet;

use crate::analyzer::{ClassAnalysisResult, HookChain};
use crate::classifier::{Container, FieldShape};
use crate::{GeneratorConfig, HostProfile};

use writer::SourceWriter;

/// Overridable method carrying the after-deserialize body when companions
/// along an inheritance chain share one interface implementation.
const CHAINED_HOOK: &str = "OnAfterDeserializeInterfaceFields";

/// Runtime category of an object handed to `InstantiateInterface`.
///
/// Each variant renders as one arm of the generated `switch`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum InstantiateCapability {
    /// An engine-managed object: cloned through the engine.
    ConcreteInstantiable,
    /// Anything else: reported, nothing returned.
    NotInstantiable,
}

impl InstantiateCapability {
    const ALL: [InstantiateCapability; 2] = [
        InstantiateCapability::ConcreteInstantiable,
        InstantiateCapability::NotInstantiable,
    ];
}

/// Renders companion source for analyzed classes.
#[derive(Copy, Clone)]
pub struct CompanionSourceEmitter<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> CompanionSourceEmitter<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        CompanionSourceEmitter { config }
    }

    fn host(&self) -> &'c HostProfile {
        &self.config.host
    }

    /// Render the companion unit for `result`.
    #[tracing::instrument(level = "trace", skip_all, fields(class = %result.class_name))]
    pub fn emit(&self, result: &ClassAnalysisResult) -> String {
        let mut w = SourceWriter::new();
        w.line("// <auto-generated/>");

        let usings = Self::usings(result);
        for using in &usings {
            w.line(using);
        }
        w.blank_line();

        if let Some(ns) = &result.namespace_name {
            w.open_block(&format!("namespace {ns}"));
        }
        for outer in &result.containing_types {
            w.open_block(&format!(
                "partial {} {}{}",
                outer.kind.keyword(),
                outer.name,
                type_param_list(&outer.type_params)
            ));
        }

        let mut header = format!(
            "partial class {}{}",
            result.class_name,
            type_param_list(&result.type_params)
        );
        if !result.implements_callback && result.hook_chain != HookChain::Override {
            header.push_str(" : ");
            header.push_str(&self.host().callback_interface);
        }
        w.open_block(&header);

        for shape in result.shapes() {
            self.backing_field(&mut w, shape);
            w.blank_line();
        }

        self.hooks(&mut w, result);

        for element in distinct_elements(result.shapes().filter(|s| s.is_list() && s.is_read_only)) {
            self.repopulate_helper(&mut w, element);
            w.blank_line();
        }

        if self.config.instantiate_helpers {
            for element in distinct_elements(result.shapes()) {
                self.instantiate_helper(&mut w, element);
                w.blank_line();
            }
        }

        w.close_block();
        for _ in &result.containing_types {
            w.close_block();
        }
        if result.namespace_name.is_some() {
            w.close_block();
        }
        w.output()
    }

    fn hooks(&self, w: &mut SourceWriter, result: &ClassAnalysisResult) {
        let host = self.host();
        if result.hook_chain != HookChain::Override {
            w.open_block(&format!(
                "void {}.{}()",
                host.callback_interface, host.before_serialize_hook
            ));
            w.close_block();
            w.blank_line();

            w.open_block(&format!(
                "void {}.{}()",
                host.callback_interface, host.after_deserialize_hook
            ));
            if result.hook_chain == HookChain::Root {
                w.line(&format!("{CHAINED_HOOK}();"));
            } else {
                self.after_deserialize_body(w, result);
            }
            w.close_block();
            w.blank_line();
        }

        match result.hook_chain {
            HookChain::Standalone => {}
            HookChain::Root => {
                w.open_block(&format!("protected virtual void {CHAINED_HOOK}()"));
                self.after_deserialize_body(w, result);
                w.close_block();
                w.blank_line();
            }
            HookChain::Override => {
                w.open_block(&format!("protected override void {CHAINED_HOOK}()"));
                w.line(&format!("base.{CHAINED_HOOK}();"));
                self.after_deserialize_body(w, result);
                w.close_block();
                w.blank_line();
            }
        }
    }

    fn after_deserialize_body(&self, w: &mut SourceWriter, result: &ClassAnalysisResult) {
        for shape in result.shapes() {
            self.after_deserialize(w, result, shape);
        }
    }

    /// The container import when any shape is a list; the declaring
    /// context's usings when carried attributes may need them.
    fn usings(result: &ClassAnalysisResult) -> Vec<String> {
        let mut usings = Vec::new();
        if result.has_list() {
            usings.push("using System.Collections.Generic;".to_string());
        }
        if result.has_carried_attributes() {
            for using in &result.usings {
                if !usings.contains(using) {
                    usings.push(using.clone());
                }
            }
        }
        usings
    }

    fn backing_field(&self, w: &mut SourceWriter, shape: &FieldShape) {
        let host = self.host();
        for attribute in &shape.carried_attributes {
            w.line(&format!("[{attribute}]"));
        }

        // The array form tells the validator to check list elements.
        let validated = match shape.container {
            Container::Single => shape.element_type_full_name.clone(),
            Container::List => format!("{}[]", shape.element_type_full_name),
        };
        w.line(&format!(
            "[{}, {}(typeof({validated}))]",
            host.serialize_field_attribute, host.validate_attribute
        ));

        let object = &host.engine_object;
        match shape.container {
            Container::Single => {
                w.line(&format!("private {object} {};", shape.backing_field_name));
            }
            Container::List => w.line(&format!(
                "private List<{object}> {} = new List<{object}>();",
                shape.backing_field_name
            )),
        }
    }

    fn after_deserialize(&self, w: &mut SourceWriter, result: &ClassAnalysisResult, shape: &FieldShape) {
        let field = &shape.field_name;
        let backing = &shape.backing_field_name;
        let element = &shape.element_type_full_name;
        let warning = self.cast_warning(&format!("{}.{field}", result.class_name), element);

        match shape.container {
            Container::Single => {
                w.line(&format!("{field} = {backing} as {element};"));
                if let Some(warning) = warning {
                    w.line(&format!("if ({field} == null && {backing} != null)"));
                    w.with_indent(|w| w.line(&warning));
                }
            }
            Container::List if shape.is_read_only => {
                w.line(&format!(
                    "{}({field}, {backing}, \"{}.{field}\");",
                    repopulate_name(element),
                    result.class_name
                ));
            }
            Container::List => {
                w.line(&format!("if ({field} == null)"));
                w.with_indent(|w| w.line(&format!("{field} = new List<{element}>();")));
                w.line(&format!("{field}.Clear();"));
                w.open_block(&format!("foreach (var obj in {backing})"));
                Self::add_if_cast(w, field, element, warning.as_deref());
                w.close_block();
            }
        }
    }

    /// Body of a repopulate loop: cast `obj`, append on success.
    fn add_if_cast(w: &mut SourceWriter, target: &str, element: &str, warning: Option<&str>) {
        w.line(&format!("var element = obj as {element};"));
        w.line("if (element != null)");
        w.with_indent(|w| w.line(&format!("{target}.Add(element);")));
        if let Some(warning) = warning {
            w.line("else if (obj != null)");
            w.with_indent(|w| w.line(warning));
        }
    }

    fn cast_warning(&self, subject: &str, element: &str) -> Option<String> {
        self.config.emit_cast_warnings.then(|| {
            format!(
                "{}.LogWarning(\"{subject}: assigned object does not implement {element}.\");",
                self.host().debug_log
            )
        })
    }

    fn repopulate_helper(&self, w: &mut SourceWriter, element: &str) {
        let host = self.host();
        w.open_block(&format!(
            "private static void {}(List<{element}> target, List<{}> source, string fieldName)",
            repopulate_name(element),
            host.engine_object
        ));

        w.open_block("if (target == null)");
        w.line(&format!(
            "{}.LogWarning(fieldName + \": readonly list is null, nothing to repopulate.\");",
            host.debug_log
        ));
        w.line("return;");
        w.close_block();
        w.line("target.Clear();");
        w.line("if (source == null)");
        w.with_indent(|w| w.line("return;"));

        let warning = self.config.emit_cast_warnings.then(|| {
            format!(
                "{}.LogWarning(fieldName + \": assigned object does not implement {element}.\");",
                host.debug_log
            )
        });
        w.open_block("foreach (var obj in source)");
        Self::add_if_cast(w, "target", element, warning.as_deref());
        w.close_block();

        w.close_block();
    }

    fn instantiate_helper(&self, w: &mut SourceWriter, element: &str) {
        w.open_block(&format!(
            "public {element} InstantiateInterface({element} instance)"
        ));
        w.open_block("switch (instance)");
        for capability in InstantiateCapability::ALL {
            self.instantiate_arm(w, capability, element);
        }
        w.close_block();
        w.close_block();
    }

    fn instantiate_arm(&self, w: &mut SourceWriter, capability: InstantiateCapability, element: &str) {
        let host = self.host();
        match capability {
            InstantiateCapability::ConcreteInstantiable => {
                w.line(&format!("case {} engineObject:", host.engine_object));
                w.with_indent(|w| {
                    w.line(&format!(
                        "return {}.Instantiate(engineObject) as {element};",
                        host.engine_object
                    ));
                });
            }
            InstantiateCapability::NotInstantiable => {
                w.line("default:");
                w.with_indent(|w| {
                    w.line(&format!(
                        "{}.LogError(\"Cannot instantiate {element}: the instance is not a {}.\");",
                        host.debug_log, host.engine_object
                    ));
                    w.line("return null;");
                });
            }
        }
    }
}

/// Element type names in first-seen order, without repeats.
fn distinct_elements<'s>(shapes: impl Iterator<Item = &'s FieldShape>) -> Vec<&'s str> {
    let mut seen = FxHashSet::default();
    shapes
        .map(|shape| shape.element_type_full_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

fn type_param_list(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// `Repopulate` plus the element type made identifier-safe.
pub(crate) fn repopulate_name(element: &str) -> String {
    format!("Repopulate{}", sanitize_identifier(element))
}

/// `Game.IGeneric<System.Int32>` becomes `Game_IGenericOfSystem_Int32`.
pub(crate) fn sanitize_identifier(type_name: &str) -> String {
    type_name
        .replace("[]", "Array")
        .replace('.', "_")
        .replace('<', "Of")
        .replace(',', "And")
        .replace(['>', '?', '[', ']', ' '], "")
}
