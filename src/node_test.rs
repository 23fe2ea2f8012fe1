use super::*;

#[test]
fn test_node_children() {
    let mut node: Node<u32> = Node::new(10, Some(3));
    assert!(node.is_red());
    assert_eq!(node.parent, Some(3));
    assert_eq!(node.child(Dir::Left), None);
    assert_eq!(node.child(Dir::Right), None);

    node.set_child(Dir::Left, Some(1));
    node.set_child(Dir::Right, Some(2));
    assert_eq!(node.left, Some(1));
    assert_eq!(node.right, Some(2));
    assert_eq!(node.child(Dir::Left.opposite()), Some(2));

    node.set_black();
    assert!(node.is_black());
    assert_eq!(node.color.to_string(), "black");
}
