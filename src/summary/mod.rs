//! Summary report generation.
//!
//! A pure text template over a topic and its contributions. Output depends only on the
//! inputs and the timestamp passed in.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{format_timestamp, Contribution, Summary, Topic};

/// Number of contributions quoted as insights.
pub const MAX_INSIGHTS: usize = 3;

/// Preview length of each insight, in characters.
pub const PREVIEW_CHARS: usize = 200;

const RECOMMENDATIONS: &str = "## Recommendations

1. **Continue the discussion** - The contributions show diverse perspectives that merit further exploration
2. **Action items** - Consider implementing the practical suggestions mentioned in the contributions
3. **Follow-up** - Schedule regular reviews to track progress on discussed topics

## Conclusion

The collaborative effort has produced valuable insights that can guide future decision-making and strategy development.

";

/// Build the summary report for `topic`.
///
/// Insights are taken from the first contributions in the order given.
pub fn generate_summary(
    topic: &Topic,
    contributions: &[Contribution],
    now: DateTime<Utc>,
) -> Result<Summary, AppError> {
    if contributions.is_empty() {
        return Err(AppError::BadRequest(
            "No contributions found for this topic".to_string(),
        ));
    }

    let count = contributions.len();
    let mut content = format!(
        "# Summary Report for {}\n\n\
         This document presents a comprehensive analysis of all contributions submitted for this topic.\n\n\
         ## Key Insights\n\n\
         Based on the {} received, several important themes emerge:\n\n",
        topic.title,
        pluralize(count),
    );

    for (i, contribution) in contributions.iter().take(MAX_INSIGHTS).enumerate() {
        content.push_str(&format!(
            "### Insight {}\n{}\n\n",
            i + 1,
            preview(&contribution.content)
        ));
    }

    content.push_str(RECOMMENDATIONS);
    content.push_str(&format!(
        "*Report generated on {} from {}*",
        now.format("%B %d, %Y"),
        pluralize(count)
    ));

    Ok(Summary {
        topic_id: topic.id.clone(),
        content,
        generated_at: format_timestamp(now),
    })
}

fn pluralize(count: usize) -> String {
    if count == 1 {
        "1 contribution".to_string()
    } else {
        format!("{} contributions", count)
    }
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
