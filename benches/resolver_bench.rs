//! Resolver throughput: element type and category lookups per generation.
//!
//! Run with: `cargo bench --bench resolver`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use retrodex::data::model::{BaseStats, Creature, Move};
use retrodex::history::{
    resolve_category, resolve_element_type, resolve_element_types, Overlay, OverlayList,
};
use retrodex::{DamageCategory, ElementType, Generation};

const ELEMENTS: [ElementType; 6] = [
    ElementType::Normal,
    ElementType::Fire,
    ElementType::Dark,
    ElementType::Steel,
    ElementType::Psychic,
    ElementType::Ghost,
];

fn synthetic_moves(count: u16) -> Vec<Move> {
    (1..=count)
        .map(|id| {
            let element = ELEMENTS[usize::from(id) % ELEMENTS.len()];
            let past_elements = if id % 3 == 0 {
                OverlayList::new(vec![Overlay::new(Generation::I, ElementType::Normal)])
                    .unwrap_or_default()
            } else {
                OverlayList::empty()
            };
            Move {
                id,
                name: format!("Move-{id}"),
                element,
                category: if id % 5 == 0 {
                    DamageCategory::Status
                } else {
                    DamageCategory::Physical
                },
                power: 60,
                accuracy: 100,
                pp: 20,
                past_elements,
            }
        })
        .collect()
}

fn synthetic_creatures(count: u16) -> Vec<Creature> {
    (1..=count)
        .map(|id| Creature {
            id,
            name: format!("creature-{id}"),
            types: [ElementType::Electric, ElementType::Steel],
            past_types: OverlayList::new(vec![Overlay::new(
                Generation::I,
                [ElementType::Electric, ElementType::None],
            )])
            .unwrap_or_default(),
            stats: BaseStats::default(),
            height: 3,
            weight: 60,
            traits: [None, None],
            learnsets: Vec::new(),
            locations: Vec::new(),
        })
        .collect()
}

fn bench_resolver(c: &mut Criterion) {
    let moves = synthetic_moves(354);
    let creatures = synthetic_creatures(386);

    let mut group = c.benchmark_group("resolver");
    group.throughput(Throughput::Elements((moves.len() * Generation::SUPPORTED.len()) as u64));
    group.bench_function("move_type_and_category", |b| {
        b.iter(|| {
            for mv in &moves {
                for generation in Generation::SUPPORTED {
                    black_box(resolve_element_type(mv, generation));
                    black_box(resolve_category(mv, generation));
                }
            }
        })
    });

    group.throughput(Throughput::Elements(
        (creatures.len() * Generation::SUPPORTED.len()) as u64,
    ));
    group.bench_function("creature_types", |b| {
        b.iter(|| {
            for creature in &creatures {
                for generation in Generation::SUPPORTED {
                    black_box(resolve_element_types(creature, generation));
                }
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resolver);
criterion_main!(benches);
