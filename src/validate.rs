//! Inheritance validation
//!
//! Runs once the whole model is built. Unknown parents are already rejected
//! at header time; this pass only has to prove every parent chain ends.

use std::collections::{HashMap, HashSet};

use crate::error::SyntaxError;
use crate::model::Interface;

/// Reject any interface whose parent chain loops, self-reference included.
///
/// `header_lines` maps interface names to their declaration line; the error
/// is reported on the line of the interface whose walk found the cycle.
pub fn check_inheritance(
    interfaces: &[Interface],
    header_lines: &HashMap<String, usize>,
) -> Result<(), SyntaxError> {
    let by_name: HashMap<&str, &Interface> =
        interfaces.iter().map(|i| (i.name.as_str(), i)).collect();

    for iface in interfaces.iter().filter(|i| i.parent.is_some()) {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(iface);

        while let Some(node) = current {
            let Some(parent) = node.parent.as_deref() else {
                break;
            };
            if !visited.insert(node.name.as_str()) {
                let message = format!("Circular inheritance detected: {} -> {}", node.name, parent);
                return Err(match header_lines.get(&iface.name) {
                    Some(&line) => SyntaxError::at(line, message),
                    None => SyntaxError::new(message),
                });
            }
            current = by_name.get(parent).copied();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, parent: Option<&str>) -> Interface {
        Interface::new(name, parent.map(str::to_string))
    }

    fn lines(list: &[Interface]) -> HashMap<String, usize> {
        list.iter()
            .enumerate()
            .map(|(n, i)| (i.name.clone(), n + 1))
            .collect()
    }

    #[test]
    fn test_self_reference() {
        let list = vec![iface("A", Some("A"))];
        let err = check_inheritance(&list, &lines(&list)).unwrap_err();
        assert_eq!(err.message, "Circular inheritance detected: A -> A");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_two_node_cycle() {
        let list = vec![iface("A", Some("B")), iface("B", Some("A"))];
        let err = check_inheritance(&list, &lines(&list)).unwrap_err();
        assert_eq!(err.message, "Circular inheritance detected: A -> B");
    }

    #[test]
    fn test_three_node_cycle_behind_a_tail() {
        let list = vec![
            iface("Leaf", Some("A")),
            iface("A", Some("B")),
            iface("B", Some("C")),
            iface("C", Some("A")),
        ];
        let err = check_inheritance(&list, &lines(&list)).unwrap_err();
        assert!(err.message.starts_with("Circular inheritance detected"));
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_linear_chain_is_fine() {
        let list = vec![
            iface("C", Some("B")),
            iface("B", Some("A")),
            iface("A", None),
        ];
        assert!(check_inheritance(&list, &lines(&list)).is_ok());
    }

    #[test]
    fn test_missing_line_information() {
        let list = vec![iface("A", Some("A"))];
        let err = check_inheritance(&list, &HashMap::new()).unwrap_err();
        assert_eq!(err.line, None);
    }
}
