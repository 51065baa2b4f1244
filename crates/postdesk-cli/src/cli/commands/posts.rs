//! Post command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use postdesk_core::api::DeleteOutcome;
use postdesk_core::config::Config;
use postdesk_core::models::{Author, Post, PostId, format_post_date};
use postdesk_core::validation::{self, EditorVariant, PostDraft, unescape_newlines};

pub async fn list(config: &Config) -> Result<()> {
    let api = super::gated_client(config)?;
    let posts = api
        .list_posts()
        .await
        .map_err(|e| super::api_failure(&api, e, "Failed to fetch posts"))?;

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }
    for post in &posts {
        println!("{}", summary_line(post));
    }
    Ok(())
}

fn summary_line(post: &Post) -> String {
    let mark = if post.is_published { "[x]" } else { "[ ]" };
    let mut line = format!("{}  {mark} {}  {}", post.id, post.status_label(), post.title);
    for extra in [post.byline(), post.display_date()] {
        if !extra.is_empty() {
            line.push_str("  ");
            line.push_str(&extra);
        }
    }
    line
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let api = super::gated_client(config)?;
    let post = api
        .get_post(&PostId::from(id))
        .await
        .map_err(|e| super::api_failure(&api, e, "Error fetching post"))?;

    println!("{}", post.title);
    let meta: Vec<String> = [post.display_date(), post.byline(), post.status_label().into()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    println!("{}", meta.join(" | "));
    if let Some(image) = post.image() {
        println!("Image: {image}");
    }
    println!();
    println!("{}", unescape_newlines(&post.content));

    if !post.comments.is_empty() {
        println!();
        println!("Comments ({}):", post.comments.len());
        for comment in &post.comments {
            let author = comment
                .author
                .as_ref()
                .map(Author::full_name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string());
            let date = comment
                .date
                .as_deref()
                .map(format_post_date)
                .unwrap_or_default();
            println!("- {author} {date}");
            println!("  {}", comment.content);
        }
    }
    Ok(())
}

pub async fn publish(config: &Config, id: &str, is_published: bool) -> Result<()> {
    let api = super::gated_client(config)?;
    let post = api
        .set_published(&PostId::from(id), is_published)
        .await
        .map_err(|e| super::api_failure(&api, e, "Failed updating published status"))?;
    println!("{}: {}", post.title, post.status_label());
    Ok(())
}

pub async fn delete(config: &Config, id: &str, yes: bool) -> Result<()> {
    let api = super::gated_client(config)?;
    if !yes && !confirm(&format!("Delete post {id}?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    let outcome = api
        .delete_post(&PostId::from(id))
        .await
        .map_err(|e| super::api_failure(&api, e, "Error deleting the post"))?;
    match outcome {
        DeleteOutcome::Deleted => println!("Deleted post {id}"),
        DeleteOutcome::Unconfirmed(status) => {
            anyhow::bail!("Server answered {status}; deletion of post {id} is not confirmed");
        }
    }
    Ok(())
}

/// Asks a y/N question on stderr and reads the answer from stdin.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Input for `posts new`.
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub publish: bool,
}

pub async fn create(config: &Config, input: NewPost) -> Result<()> {
    let variant = if input.publish {
        EditorVariant::PublishOnCreate
    } else {
        EditorVariant::from_publish_on_create(config.editor_publish_on_create)
    };
    let draft = PostDraft {
        title: input.title,
        content: input.content,
        image_url: input.image_url,
        is_published: Some(input.publish),
    };

    let api = super::gated_client(config)?;
    let request = match validation::validate(&draft, variant) {
        Ok(request) => request,
        Err(errors) => {
            for message in errors.messages() {
                eprintln!("{message}");
            }
            anyhow::bail!("Post not saved: {} validation error(s)", errors.len());
        }
    };

    let created = api
        .create_post(&request)
        .await
        .map_err(|e| super::api_failure(&api, e, "Error saving the post"))?;
    match created {
        Some(post) => println!("Created post {}: {}", post.id, post.title),
        None => println!("Post saved"),
    }
    Ok(())
}
