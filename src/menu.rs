//! Numbered terminal menu over the article repository.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::aggregation::TermCounts;
use crate::date::format_long_date;
use crate::repository::ArticleRepository;
use crate::{Article, Result};

/// An action selectable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    FindAuthors,
    FindIssues,
    AuthorArticles,
    IssueArticles,
    SearchArticles,
    Exit,
}

impl MenuAction {
    /// All actions in menu order.
    pub const ALL: [MenuAction; 6] = [
        Self::FindAuthors,
        Self::FindIssues,
        Self::AuthorArticles,
        Self::IssueArticles,
        Self::SearchArticles,
        Self::Exit,
    ];

    /// The number typed to select the action.
    pub fn number(&self) -> u32 {
        match self {
            Self::FindAuthors => 1,
            Self::FindIssues => 2,
            Self::AuthorArticles => 3,
            Self::IssueArticles => 4,
            Self::SearchArticles => 5,
            Self::Exit => 9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FindAuthors => "Find authors",
            Self::FindIssues => "Find issues",
            Self::AuthorArticles => "All articles for author",
            Self::IssueArticles => "All articles for issue",
            Self::SearchArticles => "Search articles",
            Self::Exit => "exit",
        }
    }

    /// Maps a typed line to an action; anything unrecognized is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number = input.trim().parse::<u32>().ok()?;
        Self::ALL.into_iter().find(|action| action.number() == number)
    }
}

/// Interactive loop reading choices from `input` and printing to `output`.
pub struct Menu<'a, R, W> {
    repository: &'a ArticleRepository,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(repository: &'a ArticleRepository, input: R, output: W) -> Self {
        Self {
            repository,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    ///
    /// Repository failures are reported and the menu is shown again; only
    /// terminal I/O failures end the loop with an error.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let Some(action) = MenuAction::parse(&line) else {
                writeln!(self.output)?;
                continue;
            };

            if action == MenuAction::Exit {
                writeln!(self.output, "Thanks, bye bye.")?;
                return Ok(());
            }

            if let Err(e) = self.execute(action).await {
                warn!("Menu action {:?} failed: {}", action, e);
                writeln!(self.output, "Error: {}", e)?;
            }
            writeln!(self.output)?;
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        for action in MenuAction::ALL {
            writeln!(self.output, "{}. {}", action.number(), action.label())?;
        }
        writeln!(self.output, "Please type your option: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    async fn execute(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::FindAuthors => {
                let authors = self.repository.find_authors().await?;
                self.print_counts("Authors", &authors)
            }
            MenuAction::FindIssues => {
                let issues = self.repository.find_issues().await?;
                self.print_counts("Issues", &issues)
            }
            MenuAction::AuthorArticles => {
                let author = self.prompt("Type the name of the author:")?;
                let articles = self.repository.find_articles_for_author(&author).await?;
                writeln!(self.output, "Articles for author: [{}]", author)?;
                for article in &articles {
                    writeln!(self.output, "{} [{}]", article.title_or_default(), date_of(article))?;
                }
                Ok(())
            }
            MenuAction::IssueArticles => {
                let issue = self.prompt("Type the name of the issue:")?;
                let articles = self.repository.find_articles_for_issue(&issue).await?;
                writeln!(self.output, "Articles for issue: [{}]", issue)?;
                for article in &articles {
                    writeln!(
                        self.output,
                        "{} [{}]",
                        article.title_or_default(),
                        article.author_or_default()
                    )?;
                }
                Ok(())
            }
            MenuAction::SearchArticles => {
                let term = self.prompt("Enter term to search for:")?;
                let articles = self.repository.search_articles(Some(&term)).await?;
                writeln!(self.output, "Articles for search string: [{}]", term)?;
                for article in &articles {
                    writeln!(
                        self.output,
                        "{} [{}-{}]",
                        article.title_or_default(),
                        article.author_or_default(),
                        date_of(article)
                    )?;
                }
                Ok(())
            }
            MenuAction::Exit => Ok(()),
        }
    }

    fn print_counts(&mut self, heading: &str, counts: &TermCounts) -> Result<()> {
        writeln!(self.output, "{}", heading)?;
        for bucket in counts {
            writeln!(self.output, "{} ({})", bucket.key, bucket.count)?;
        }
        Ok(())
    }
}

fn date_of(article: &Article) -> String {
    article.post_date.map(format_long_date).unwrap_or_default()
}
