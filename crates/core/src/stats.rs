//! Summary statistics over a list of blog posts.
//!
//! All helpers are pure and deterministic for a fixed input order. Ties are
//! resolved in favour of whatever appears first in the input.

use std::collections::HashMap;

use serde::Serialize;

use crate::BlogPost;

/// An author together with the number of posts attributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub blogs: usize,
}

/// Sum of likes across all posts (0 for an empty list).
///
/// Saturates at `u64::MAX`.
pub fn total_likes(posts: &[BlogPost]) -> u64 {
    posts.iter().fold(0u64, |acc, p| acc.saturating_add(p.likes))
}

/// The post with the most likes.
///
/// Uses a strictly-greater scan, so the first of several equally liked posts
/// wins. (`Iterator::max_by_key` would return the last one.)
pub fn favorite_post(posts: &[BlogPost]) -> Option<&BlogPost> {
    posts
        .iter()
        .reduce(|fav, post| if post.likes > fav.likes { post } else { fav })
}

/// The author with the most posts. Posts without an author are not counted.
///
/// On a tie the author whose first post appears earliest wins.
pub fn most_prolific_author(posts: &[BlogPost]) -> Option<AuthorCount> {
    // Counts kept in first-appearance order.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for author in posts.iter().filter_map(|p| p.author.as_deref()) {
        match index.get(author) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(author, counts.len());
                counts.push((author, 1));
            }
        }
    }

    counts
        .into_iter()
        .reduce(|top, entry| if entry.1 > top.1 { entry } else { top })
        .map(|(author, blogs)| AuthorCount {
            author: author.to_string(),
            blogs,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;

    fn post(title: &str, author: &str, likes: u64) -> BlogPost {
        BlogPost::new(
            title,
            Some(author.to_string()),
            format!("http://{}.com", title.to_lowercase().replace(' ', "")),
            Some(likes),
            UserId::new(),
        )
    }

    fn sample() -> Vec<BlogPost> {
        vec![
            post("Blog 1", "Author 1", 10),
            post("Blog 2", "Author 2", 5),
            post("Blog 3", "Author 3", 12),
        ]
    }

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn total_likes_of_single_post_equals_its_likes() {
        let blogs = sample();
        assert_eq!(total_likes(&blogs[..1]), 10);
    }

    #[test]
    fn total_likes_of_bigger_list() {
        assert_eq!(total_likes(&sample()), 27);
    }

    #[test]
    fn total_likes_saturates_instead_of_overflowing() {
        let blogs = vec![post("A", "a", u64::MAX), post("B", "b", u64::MAX), post("C", "c", 1)];
        assert_eq!(total_likes(&blogs), u64::MAX);
    }

    #[test]
    fn favorite_of_empty_list_is_none() {
        assert_eq!(favorite_post(&[]), None);
    }

    #[test]
    fn favorite_of_single_post_is_that_post() {
        let blogs = sample();
        assert_eq!(favorite_post(&blogs[..1]), Some(&blogs[0]));
    }

    #[test]
    fn favorite_picks_most_liked() {
        let blogs = sample();
        assert_eq!(favorite_post(&blogs), Some(&blogs[2]));
    }

    #[test]
    fn favorite_tie_keeps_first_encountered() {
        let blogs = vec![
            post("First", "A", 7),
            post("Second", "B", 7),
            post("Third", "C", 3),
        ];
        assert_eq!(favorite_post(&blogs).map(|b| b.title.as_str()), Some("First"));
    }

    #[test]
    fn most_prolific_of_empty_list_is_none() {
        assert_eq!(most_prolific_author(&[]), None);
    }

    #[test]
    fn most_prolific_counts_posts_per_author() {
        let blogs = vec![
            post("Blog 1", "Author 1", 10),
            post("Blog 2", "Author 1", 5),
            post("Blog 3", "Author 2", 12),
        ];
        assert_eq!(
            most_prolific_author(&blogs),
            Some(AuthorCount {
                author: "Author 1".to_string(),
                blogs: 2
            })
        );
    }

    #[test]
    fn most_prolific_tie_keeps_first_author_seen() {
        let blogs = vec![
            post("x", "B", 1),
            post("y", "A", 1),
            post("z", "A", 1),
            post("w", "B", 1),
        ];
        assert_eq!(most_prolific_author(&blogs).unwrap().author, "B");
    }

    #[test]
    fn authorless_posts_are_not_counted() {
        let anonymous = BlogPost::new("Anon", None, "http://anon.com", None, UserId::new());
        assert_eq!(most_prolific_author(&[anonymous.clone()]), None);

        let blogs = vec![anonymous.clone(), anonymous, post("Named", "Ada", 0)];
        assert_eq!(
            most_prolific_author(&blogs),
            Some(AuthorCount {
                author: "Ada".to_string(),
                blogs: 1
            })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: total likes equals the arithmetic sum of every post's likes.
            #[test]
            fn total_likes_is_the_sum(likes in prop::collection::vec(0u64..1_000_000u64, 0..32)) {
                let blogs: Vec<BlogPost> = likes
                    .iter()
                    .enumerate()
                    .map(|(i, l)| post(&format!("Blog {i}"), "Author", *l))
                    .collect();
                prop_assert_eq!(total_likes(&blogs), likes.iter().sum::<u64>());
            }

            /// Property: the favorite has the maximum likes and no earlier post ties it.
            #[test]
            fn favorite_is_first_maximum(likes in prop::collection::vec(0u64..50u64, 1..32)) {
                let blogs: Vec<BlogPost> = likes
                    .iter()
                    .enumerate()
                    .map(|(i, l)| post(&format!("Blog {i}"), "Author", *l))
                    .collect();
                let max = *likes.iter().max().unwrap();
                let first_max = likes.iter().position(|l| *l == max).unwrap();
                prop_assert_eq!(favorite_post(&blogs), Some(&blogs[first_max]));
            }

            /// Property: the winning author's count is never below any other author's.
            #[test]
            fn most_prolific_count_is_maximal(authors in prop::collection::vec(0usize..5, 1..40)) {
                let blogs: Vec<BlogPost> = authors
                    .iter()
                    .map(|a| post("Blog", &format!("Author {a}"), 0))
                    .collect();
                let top = most_prolific_author(&blogs).unwrap();
                for a in 0..5 {
                    let count = authors.iter().filter(|x| **x == a).count();
                    prop_assert!(top.blogs >= count);
                }
            }
        }
    }
}
