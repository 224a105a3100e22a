use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bloglist_core::{BlogPost, UserId, favorite_post, most_prolific_author, total_likes};

fn sample_posts(n: usize) -> Vec<BlogPost> {
    let owner = UserId::new();
    (0..n)
        .map(|i| {
            BlogPost::new(
                format!("Post {i}"),
                Some(format!("Author {}", i % 37)),
                format!("https://blogs.example/{i}"),
                Some((i as u64 * 7919) % 1000),
                owner,
            )
        })
        .collect()
}

fn bench_stats(c: &mut Criterion) {
    let posts = sample_posts(10_000);

    c.bench_function("total_likes_10k", |b| b.iter(|| total_likes(black_box(&posts))));
    c.bench_function("favorite_post_10k", |b| b.iter(|| favorite_post(black_box(&posts))));
    c.bench_function("most_prolific_author_10k", |b| {
        b.iter(|| most_prolific_author(black_box(&posts)))
    });
}

criterion_group!(benches, bench_stats);
criterion_main!(benches);
