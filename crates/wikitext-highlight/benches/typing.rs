use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use wikitext_core::Theme;
use wikitext_highlight::{EditingSession, EditorConfig};

fn large_wikitext(paragraphs: usize) -> String {
    let mut out = String::with_capacity(paragraphs * 160);
    for i in 0..paragraphs {
        out.push_str(&format!(
            "== Section {i} ==\n\
             '''Cats''' are ''small'' [[mammal]]s.<ref>{{{{Cite|id={i}}}}}</ref> \
             [[File:Cat{i}.png|thumb|A [[cat]]]] <!-- note -->\n\
             * item <s>old</s> H<sub>2</sub>O\n"
        ));
    }
    out
}

fn bench_open(c: &mut Criterion) {
    let text = large_wikitext(2_000);
    c.bench_function("session_open/2k_sections", |b| {
        b.iter(|| {
            let session = EditingSession::new(black_box(&text), EditorConfig::default()).unwrap();
            black_box(session.version());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_wikitext(2_000);
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || EditingSession::new(&text, EditorConfig::default()).unwrap(),
            |mut session| {
                let mut offset = session.document().len_chars() / 2;
                for ch in "'''typed text''' [[link]] ".chars().cycle().take(100) {
                    let mut buf = [0u8; 4];
                    session
                        .edit(offset..offset, ch.encode_utf8(&mut buf))
                        .unwrap();
                    offset += 1;
                }
                black_box(session.version());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_find_session(c: &mut Criterion) {
    let text = large_wikitext(2_000);
    c.bench_function("find/start_and_cycle", |b| {
        b.iter_batched(
            || EditingSession::new(&text, EditorConfig::default()).unwrap(),
            |mut session| {
                let count = session.start_find("cat").unwrap();
                for _ in 0..50 {
                    session.find_next(None).unwrap();
                }
                session.end_find().unwrap();
                black_box(count);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_restyle(c: &mut Criterion) {
    let text = large_wikitext(2_000);
    let mut session = EditingSession::new(&text, EditorConfig::default()).unwrap();
    let mut dark = false;
    c.bench_function("restyle/theme_switch", |b| {
        b.iter(|| {
            dark = !dark;
            session.set_theme(if dark { Theme::dark() } else { Theme::light() });
            black_box(session.resolver().runs().len());
        })
    });
}

criterion_group!(
    benches,
    bench_open,
    bench_typing_in_middle,
    bench_find_session,
    bench_restyle
);
criterion_main!(benches);
