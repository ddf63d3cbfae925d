use super::*;

/// A right-leaning chain `depth` levels deep, walked recursively.
enum Chain {
    Link(Box<Chain>),
    End,
}

fn build(depth: usize) -> Chain {
    let mut chain = Chain::End;
    for _ in 0..depth {
        chain = Chain::Link(Box::new(chain));
    }
    chain
}

fn depth_of(chain: &Chain) -> usize {
    ensure_sufficient_stack(|| match chain {
        Chain::Link(next) => depth_of(next) + 1,
        Chain::End => 0,
    })
}

#[test]
fn shallow_walk() {
    assert_eq!(depth_of(&build(10)), 10);
}

#[test]
fn deep_walk_does_not_overflow() {
    let chain = build(100_000);
    assert_eq!(depth_of(&chain), 100_000);
    // Iterative drop; the derived drop would recurse 100k frames.
    let mut cur = chain;
    while let Chain::Link(next) = cur {
        cur = *next;
    }
}

#[test]
fn passes_result_through() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}
