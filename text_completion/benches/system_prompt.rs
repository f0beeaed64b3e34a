use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use futures::StreamExt;
use std::time::Duration;
use text_completion::{typewriter, Conversation, Message, SystemPrompt};

// $ cargo bench -p text_completion
//
// Both run once per chat turn, so anything in the microsecond range is fine.

fn bench_system_prompt(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let mut conversation = Conversation::new();
    for i in 0..20 {
        conversation.push(Message::user(format!("question {}", i)));
        conversation.push(Message::assistant(format!("- answer {}", i)));
    }

    c.bench_function("render system prompt", |b| {
        b.iter(|| SystemPrompt.render(black_box(date)))
    });

    c.bench_function("prepend to 41 messages", |b| {
        b.iter(|| SystemPrompt.prepend(black_box(&conversation), date))
    });
}

fn bench_typewriter(c: &mut Criterion) {
    let text = "- Switch to LED bulbs\n- Wash clothes in cold water\n".repeat(50);

    c.bench_function("typewriter without cadence", |b| {
        b.iter(|| {
            //a zero sleep still needs the tokio timer
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            rt.block_on(typewriter(black_box(&text), Duration::ZERO).count())
        })
    });

    c.bench_function("tokens", |b| {
        b.iter(|| text_completion::tokens(black_box(&text)))
    });
}

criterion_group!(benches, bench_system_prompt, bench_typewriter);
criterion_main!(benches);
