// src/services/color_service.rs
// Resolves the pen color a group draws its paths with

use crate::models::{Color, Node, DEFAULT_FILL};

/// The group's fill, upper-cased, or black when it has none. Anything that is
/// not a group has no color and is skipped by the caller.
pub fn resolve(node: &Node) -> Option<Color> {
    match node {
        Node::Group(group) => Some(Color::new(group.fill.as_deref().unwrap_or(DEFAULT_FILL))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Group;

    fn group(fill: Option<&str>) -> Node {
        Node::Group(Group {
            fill: fill.map(str::to_string),
            children: vec![Node::path("M0 0 l1 1")],
        })
    }

    #[test]
    fn test_fill_is_uppercased() {
        assert_eq!(resolve(&group(Some("#ff8800"))), Some(Color::new("#FF8800")));
        assert_eq!(resolve(&group(Some("#ff8800"))).unwrap().as_str(), "#FF8800");
    }

    #[test]
    fn test_missing_fill_defaults_to_black() {
        assert_eq!(resolve(&group(None)).unwrap().as_str(), "#000000");
    }

    #[test]
    fn test_non_groups_have_no_color() {
        assert_eq!(resolve(&Node::path("M0 0 l1 1")), None);
        assert_eq!(
            resolve(&Node::Other {
                tag: "rect".to_string()
            }),
            None
        );
    }
}
