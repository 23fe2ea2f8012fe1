use super::*;

#[test]
fn test_arena_reuse() {
    let mut arena: Arena<u32> = Arena::new();

    let a = arena.alloc(Node::new(10, None));
    let b = arena.alloc(Node::new(20, Some(a)));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena[b].parent, Some(a));

    let ha = arena.handle(a);
    assert_eq!(arena.get(ha), Some(a));

    let node = arena.free(a);
    assert_eq!(node.key, 10);
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.get(ha), None);

    // slot is reused, the old handle must not see the new occupant.
    let c = arena.alloc(Node::new(30, None));
    assert_eq!(c, a);
    assert_eq!(arena.get(ha), None);
    assert_eq!(arena.get(arena.handle(c)), Some(c));
    assert_eq!(arena[c].key, 30);
}

#[test]
fn test_arena_foreign_handle() {
    let mut x: Arena<u32> = Arena::new();
    let mut y: Arena<u32> = Arena::new();

    let a = x.alloc(Node::new(1, None));
    let b = y.alloc(Node::new(2, None));
    assert_eq!(a, b);

    // same slot index, same stamp, different arena.
    assert_eq!(x.get(y.handle(b)), None);
    assert_eq!(y.get(x.handle(a)), None);
    assert_eq!(x.get(x.handle(a)), Some(a));
}

#[test]
fn test_arena_swap_keys() {
    let mut arena: Arena<String> = Arena::new();
    let a = arena.alloc(Node::new("a".to_string(), None));
    let b = arena.alloc(Node::new("b".to_string(), None));

    arena.swap_keys(b, a);
    assert_eq!(arena[a].key, "b");
    assert_eq!(arena[b].key, "a");

    arena.swap_keys(a, a);
    assert_eq!(arena[a].key, "b");
}

#[test]
fn test_arena_get_out_of_range() {
    let arena: Arena<u8> = Arena::new();
    let handle = Handle {
        tree: arena.tree,
        index: 7,
        stamp: 1,
    };
    assert_eq!(arena.get(handle), None);
}

#[test]
#[should_panic]
fn test_arena_double_free() {
    let mut arena: Arena<u8> = Arena::new();
    let a = arena.alloc(Node::new(1, None));
    arena.free(a);
    arena.free(a);
}
