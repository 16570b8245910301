//! Deterministic synthetic call tree for the terminal host.

use hchart_core::{FramePayload, IntervalNode};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const MANAGED: &[&str] = &[
    "org.app.server.Handler.handle",
    "org.app.server.Router.dispatch",
    "org.app.db.Pool.acquire",
    "org.app.render.Layout.measure",
    "java.util.HashMap.get",
    "java.util.ArrayList.sort",
    "java.lang.String.hashCode",
    "kotlin.collections.CollectionsKt.map",
    "android.os.Looper.loop",
    "android.view.View.draw",
];

const NATIVE: &[&str] = &[
    "libc::read",
    "libc::epoll_wait",
    "std::vec::Vec::push",
    "alloc::raw_vec::finish_grow",
    "core::ptr::drop_in_place",
];

fn pick(rng: &mut StdRng, names: &[&'static str]) -> &'static str {
    names.choose(rng).copied().unwrap_or("main")
}

fn payload(rng: &mut StdRng) -> FramePayload {
    match rng.random_range(0..8) {
        0 => FramePayload::usage(pick(rng, MANAGED), rng.random_range(0.0..=1.0)),
        1 | 2 => FramePayload::native(pick(rng, NATIVE)),
        _ => FramePayload::managed(pick(rng, MANAGED)),
    }
}

/// A tree spanning `[0, duration]`, at most `max_depth` levels below the
/// root and roughly `budget` nodes.
pub fn synthetic_tree(
    seed: u64,
    duration: i64,
    max_depth: u32,
    budget: usize,
) -> IntervalNode<FramePayload> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut budget = budget;
    build(&mut rng, 0, duration.max(1), 0, max_depth, &mut budget)
}

fn build(
    rng: &mut StdRng,
    start: i64,
    end: i64,
    depth: u32,
    max_depth: u32,
    budget: &mut usize,
) -> IntervalNode<FramePayload> {
    let mut node = IntervalNode::new(start, end, payload(rng));
    *budget = budget.saturating_sub(1);

    let span = end - start;
    if depth >= max_depth || span < 4 {
        return node;
    }
    let mut cursor = start;
    while cursor < end && *budget > 0 {
        // Leave some self time between callees.
        let gap = rng.random_range(0..(span / 10).max(1));
        let child_start = cursor + gap;
        let remaining = end - child_start;
        if remaining <= 0 {
            break;
        }
        let len = ((remaining as f64) * rng.random_range(0.3..=1.0)).ceil() as i64;
        let child_end = (child_start + len.max(1)).min(end);
        node.push_child(build(rng, child_start, child_end, depth + 1, max_depth, budget));
        cursor = child_end;
    }
    node
}
