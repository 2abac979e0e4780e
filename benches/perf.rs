use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use nonpb_terminal::hierarchy::Hierarchy;
use nonpb_terminal::resolver::{find_player, player_label, resolve};

fn sample_json() -> String {
    let mut years = Vec::new();
    for year in 2010..2024 {
        let mut leagues = Vec::new();
        for league in ["Central", "Pacific"] {
            let mut teams = Vec::new();
            for team in 0..6 {
                let players = (0..40)
                    .map(|idx| {
                        format!(
                            r#"{{"nameJ":"選手{idx}","nameE":"Player {idx}","ids":["a{idx}","b{idx}"]}}"#
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                teams.push(format!(r#""Team {team}":[{players}]"#));
            }
            leagues.push(format!(r#""{league}":{{{}}}"#, teams.join(",")));
        }
        years.push(format!(r#""{year}":{{{}}}"#, leagues.join(",")));
    }
    format!("{{{}}}", years.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let raw = sample_json();
    c.bench_function("hierarchy_parse", |b| {
        b.iter(|| {
            let h = Hierarchy::from_json_str(black_box(&raw)).unwrap();
            black_box(h.is_empty());
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let h = Hierarchy::from_json_str(&sample_json()).unwrap();
    c.bench_function("resolve_full_selection", |b| {
        b.iter(|| {
            let out = resolve(
                Some(black_box(&h)),
                Some("2023"),
                Some("Pacific"),
                Some("Team 5"),
            );
            black_box(out.players.len());
        })
    });

    let label = player_label("選手39", "Player 39");
    c.bench_function("find_player_last_in_roster", |b| {
        b.iter(|| {
            let record = find_player(&h, "2023", "Pacific", "Team 5", black_box(&label));
            black_box(record.is_some());
        })
    });
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
