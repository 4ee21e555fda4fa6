use crate::models::response::{BoardThread, Meme, NewsArticle, RedditPost, TrendingTopic};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));
        for row in rows {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        table.to_string()
    }

    pub fn format_trends(&self, topics: &[TrendingTopic]) -> String {
        let rows: Vec<Vec<String>> = topics
            .iter()
            .map(|t| vec![t.challenge.clone(), t.reason.clone()])
            .collect();
        self.format_table(&["Challenge", "Reason"], &rows)
    }

    pub fn format_memes(&self, memes: &[Meme]) -> String {
        let rows: Vec<Vec<String>> = memes
            .iter()
            .map(|m| vec![m.title.clone(), m.url.clone()])
            .collect();
        self.format_table(&["Title", "URL"], &rows)
    }

    pub fn format_reddit(&self, posts: &[RedditPost]) -> String {
        let rows: Vec<Vec<String>> = posts
            .iter()
            .map(|p| vec![p.title.clone(), p.score.to_string(), p.url.clone()])
            .collect();
        self.format_table(&["Title", "Score", "URL"], &rows)
    }

    pub fn format_news(&self, articles: &[NewsArticle]) -> String {
        let rows: Vec<Vec<String>> = articles
            .iter()
            .map(|a| vec![a.title.clone(), a.source.clone(), a.url.clone()])
            .collect();
        self.format_table(&["Headline", "Source", "URL"], &rows)
    }

    pub fn format_board(&self, threads: &[BoardThread]) -> String {
        let rows: Vec<Vec<String>> = threads
            .iter()
            .map(|t| vec![t.subject.clone(), t.replies.to_string(), t.url.clone()])
            .collect();
        self.format_table(&["Subject", "Replies", "URL"], &rows)
    }
}
