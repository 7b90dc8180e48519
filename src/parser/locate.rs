use tree_sitter::{Node, Tree};
use tracing::debug;

/// Shape of a method's receiver clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// Plain function, no receiver clause
    None,
    /// `func (c Foo) ...`
    Value(String),
    /// `func (c *Foo) ...`
    Pointer(String),
    /// Receiver present but its type is not a named type; holds the node kind
    Unrecognized(String),
}

impl Receiver {
    /// Named type of the receiver with pointer indirection removed
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Receiver::Value(name) | Receiver::Pointer(name) => Some(name),
            Receiver::None | Receiver::Unrecognized(_) => None,
        }
    }
}

/// The function or method declaration that encloses an offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingFunction {
    pub function_name: String,
    pub receiver: Receiver,
    /// Receiver type name with the controller suffix stripped, empty for plain functions
    pub receiver_type_name: String,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// Find the top-level function declaration whose byte range contains `offset`.
///
/// The range is inclusive at both ends and starts at the `func` keyword, so a
/// doc comment above the declaration does not count. Declarations are visited
/// in source order and the first one containing the offset wins.
pub fn find_enclosing_function(
    tree: &Tree,
    source: &str,
    offset: usize,
    controller_suffix: &str,
) -> Option<EnclosingFunction> {
    let root = tree.root_node();
    let mut cursor = root.walk();

    let node = root
        .named_children(&mut cursor)
        .filter(is_function_node)
        .find(|node| node.start_byte() <= offset && offset <= node.end_byte())?;

    let function_name = node
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .unwrap_or_default()
        .to_string();

    let receiver = extract_receiver(&node, source);
    let receiver_type_name = receiver
        .type_name()
        .map(|name| strip_controller_suffix(name, controller_suffix))
        .unwrap_or_default()
        .to_string();

    debug!(
        "Offset {} is inside {} [{}, {}], receiver {:?}",
        offset,
        function_name,
        node.start_byte(),
        node.end_byte(),
        receiver
    );

    Some(EnclosingFunction {
        function_name,
        receiver,
        receiver_type_name,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    })
}

/// Strip the controller suffix once, exact and case-sensitive
pub fn strip_controller_suffix<'a>(type_name: &'a str, suffix: &str) -> &'a str {
    type_name.strip_suffix(suffix).unwrap_or(type_name)
}

fn is_function_node(node: &Node) -> bool {
    node.kind() == "function_declaration" || node.kind() == "method_declaration"
}

/// Classify the receiver clause of a declaration
fn extract_receiver(node: &Node, source: &str) -> Receiver {
    let Some(params) = node.child_by_field_name("receiver") else {
        return Receiver::None;
    };

    let mut cursor = params.walk();
    let Some(param) = params
        .named_children(&mut cursor)
        .find(|child| child.kind() == "parameter_declaration")
    else {
        return Receiver::Unrecognized(params.kind().to_string());
    };

    let Some(ty) = param.child_by_field_name("type") else {
        return Receiver::Unrecognized(param.kind().to_string());
    };

    if ty.kind() == "pointer_type" {
        let mut pointer_cursor = ty.walk();
        let pointee = ty
            .named_children(&mut pointer_cursor)
            .find(|child| child.kind() != "comment");
        return match pointee.and_then(|inner| named_type(&inner, source)) {
            Some(name) => Receiver::Pointer(name),
            None => Receiver::Unrecognized(
                pointee.map_or(ty.kind(), |inner| inner.kind()).to_string(),
            ),
        };
    }

    match named_type(&ty, source) {
        Some(name) => Receiver::Value(name),
        None => Receiver::Unrecognized(ty.kind().to_string()),
    }
}

/// Name of a plain or generic named type; `Repo[T]` names `Repo`
fn named_type(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "type_identifier" => node
            .utf8_text(source.as_bytes())
            .ok()
            .map(|text| text.to_string()),
        "generic_type" => node
            .child_by_field_name("type")
            .and_then(|inner| named_type(&inner, source)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::GoParser;

    const SUFFIX: &str = "Controller";

    fn locate(source: &str, offset: usize) -> Option<EnclosingFunction> {
        let mut parser = GoParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        find_enclosing_function(&tree, source, offset, SUFFIX)
    }

    #[test]
    fn test_pointer_receiver_strips_controller_suffix() {
        let source = r#"package ctrls

func (c *FooController) Bar() {
	c.Render()
}
"#;
        let start = source.find("func").unwrap();
        let end = source.rfind('}').unwrap() + 1;

        for offset in [start, start + 10, end - 1, end] {
            let func = locate(source, offset).expect("offset inside method");
            assert_eq!(func.function_name, "Bar");
            assert_eq!(func.receiver, Receiver::Pointer("FooController".to_string()));
            assert_eq!(func.receiver_type_name, "Foo");
            assert_eq!((func.start_byte, func.end_byte), (start, end));
        }
    }

    #[test]
    fn test_value_receiver_without_suffix() {
        let source = "package ctrls\n\nfunc (c Baz) Qux() {}\n";
        let offset = source.find("Qux").unwrap();

        let func = locate(source, offset).unwrap();
        assert_eq!(func.function_name, "Qux");
        assert_eq!(func.receiver, Receiver::Value("Baz".to_string()));
        assert_eq!(func.receiver_type_name, "Baz");
    }

    #[test]
    fn test_plain_function_has_empty_receiver() {
        let source = "package ctrls\n\nfunc helper() int {\n\treturn 1\n}\n";
        let offset = source.find("return").unwrap();

        let func = locate(source, offset).unwrap();
        assert_eq!(func.function_name, "helper");
        assert_eq!(func.receiver, Receiver::None);
        assert_eq!(func.receiver_type_name, "");
    }

    #[test]
    fn test_offset_outside_functions() {
        let source = r#"package ctrls

import "fmt"

// Index renders the list
func (c *UserController) Index() {
	fmt.Println("index")
}

type UserController struct{}
"#;
        assert!(locate(source, 0).is_none());
        assert!(locate(source, source.find("Index renders").unwrap()).is_none());
        assert!(locate(source, source.find("type User").unwrap()).is_none());
        assert!(locate(source, source.len() + 100).is_none());
    }

    #[test]
    fn test_picks_method_among_several() {
        let source = r#"package ctrls

func (c *UserController) Index() {
}

func (c *UserController) Show(id int) {
	_ = id
}

func (c *UserController) Edit() {
}
"#;
        let func = locate(source, source.find("_ = id").unwrap()).unwrap();
        assert_eq!(func.function_name, "Show");
        assert_eq!(func.receiver_type_name, "User");
    }

    #[test]
    fn test_end_offset_is_inclusive() {
        let source = "package ctrls\nfunc (c *AController) Index() {}\nfunc (c *AController) Show() {}\n";
        let boundary = source.find("}\n").unwrap() + 1;

        let func = locate(source, boundary).unwrap();
        assert_eq!(func.function_name, "Index");
    }

    #[test]
    fn test_generic_receiver() {
        let source = "package ctrls\n\nfunc (r *RepoController[T]) List() {}\n";
        let func = locate(source, source.find("List").unwrap()).unwrap();

        assert_eq!(func.receiver, Receiver::Pointer("RepoController".to_string()));
        assert_eq!(func.receiver_type_name, "Repo");
    }

    #[test]
    fn test_unrecognized_receiver_shape() {
        let source = "package ctrls\n\nfunc (c *pkg.Foo) Bar() {}\n";
        let func = locate(source, source.find("Bar").unwrap()).unwrap();

        assert!(matches!(func.receiver, Receiver::Unrecognized(_)));
        assert_eq!(func.receiver_type_name, "");
        assert_eq!(func.function_name, "Bar");
    }

    #[test]
    fn test_suffix_only_type_name() {
        assert_eq!(strip_controller_suffix("Controller", SUFFIX), "");
        assert_eq!(strip_controller_suffix("FooController", SUFFIX), "Foo");
        assert_eq!(strip_controller_suffix("Foocontroller", SUFFIX), "Foocontroller");
        assert_eq!(
            strip_controller_suffix("ControllerFoo", SUFFIX),
            "ControllerFoo"
        );
    }
}
