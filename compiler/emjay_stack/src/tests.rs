use super::*;

enum Nest {
    Leaf,
    Wrap(Box<Nest>),
}

fn depth(nest: &Nest) -> usize {
    ensure_sufficient_stack(|| match nest {
        Nest::Leaf => 0,
        Nest::Wrap(inner) => depth(inner) + 1,
    })
}

#[test]
fn test_shallow_nesting() {
    let nest = Nest::Wrap(Box::new(Nest::Wrap(Box::new(Nest::Leaf))));
    assert_eq!(depth(&nest), 2);
}

#[test]
fn test_deep_nesting() {
    // Deep enough to overflow a default 8MB stack without growth
    let mut nest = Nest::Leaf;
    for _ in 0..100_000 {
        nest = Nest::Wrap(Box::new(nest));
    }
    assert_eq!(depth(&nest), 100_000);

    // Unwind iteratively; the recursive Drop would overflow otherwise
    while let Nest::Wrap(inner) = nest {
        nest = *inner;
    }
}

#[test]
fn test_passes_result_through() {
    let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("lexer"));
    assert_eq!(result, Err("lexer"));
}
