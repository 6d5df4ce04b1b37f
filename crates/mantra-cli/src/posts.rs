//! Read-only post query handlers.

use chrono::Utc;
use mantra_content::{format_date_short, ContentRepository, Post};
use mantra_core::AppConfig;

use crate::PostsCommands;

pub(crate) fn run_posts(config: &AppConfig, command: PostsCommands) -> anyhow::Result<()> {
    let repo = ContentRepository::load(&config.content_dir)?;

    match command {
        PostsCommands::Latest { count } => print_posts(repo.latest_posts(count).iter()),
        PostsCommands::Get { slug } => {
            let post = repo
                .post_by_slug(&slug)
                .ok_or_else(|| anyhow::anyhow!("post '{slug}' not found"))?;
            print_post_detail(post);
        }
        PostsCommands::Search { query } => print_posts(repo.search_posts(&query)),
        PostsCommands::Category { slug } => print_posts(repo.posts_by_category(&slug)),
        PostsCommands::Tag { slug } => print_posts(repo.posts_by_tag(&slug)),
        PostsCommands::Related { slug, count } => {
            let post = repo
                .post_by_slug(&slug)
                .ok_or_else(|| anyhow::anyhow!("post '{slug}' not found"))?;
            print_posts(repo.related_posts(post, count));
        }
        PostsCommands::Trending { count } => print_posts(repo.trending_posts(count, Utc::now())),
        PostsCommands::Tags { count } => {
            println!("{:<30}POSTS", "TAG");
            for tag in repo.popular_tags(count) {
                println!("{:<30}{}", tag.slug, tag.count);
            }
        }
        PostsCommands::Categories => {
            println!("{:<30}POSTS", "CATEGORY");
            for category in repo.all_categories() {
                println!("{:<30}{}", category.name, category.count);
            }
        }
    }

    Ok(())
}

fn print_posts<'a>(posts: impl IntoIterator<Item = &'a Post>) {
    let mut any = false;
    for post in posts {
        any = true;
        println!("{}", post_line(post));
    }
    if !any {
        println!("no posts found");
    }
}

fn post_line(post: &Post) -> String {
    format!(
        "{:<14}{:<10}{}  {}",
        format_date_short(&post.date),
        post.content_type,
        post.title,
        post.url()
    )
}

fn print_post_detail(post: &Post) {
    println!("{}", post.title);
    println!(
        "{} · {} min read · {}",
        format_date_short(&post.date),
        post.reading_time,
        post.categories.join(", ")
    );
    if !post.tags.is_empty() {
        let tags: Vec<_> = post.tags.iter().map(|t| t.name.as_str()).collect();
        println!("tags: {}", tags.join(", "));
    }
    println!("{}", post.url());
    if !post.excerpt.is_empty() {
        println!();
        println!("{}", post.excerpt);
    }
}

#[cfg(test)]
mod tests {
    use mantra_content::{PostTag, Seo};

    use super::*;

    #[test]
    fn post_line_shows_date_type_title_and_url() {
        let post = Post {
            id: 1,
            slug: "gojira-tour".into(),
            title: "Gojira announce tour".into(),
            content: String::new(),
            excerpt: String::new(),
            date: "2026-03-01T09:00:00Z".into(),
            modified: String::new(),
            categories: vec!["News".into()],
            tags: vec![PostTag {
                name: "Gojira".into(),
                slug: "gojira".into(),
            }],
            featured_image: String::new(),
            featured_image_alt: String::new(),
            content_type: "news".into(),
            word_count: 400,
            reading_time: 2,
            path: "/gojira-tour".into(),
            url_prefix: String::new(),
            seo: Seo::default(),
        };
        let line = post_line(&post);
        assert!(line.starts_with("Mar 1, 2026"));
        assert!(line.contains("news"));
        assert!(line.ends_with("Gojira announce tour  /gojira-tour"));
    }
}
