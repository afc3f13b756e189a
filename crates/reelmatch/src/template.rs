//! HTML for dropdown entries and movie summaries.

use crate::omdb::{MovieDetail, MovieSummary};
use crate::stats::{movie_stats, Stat};
use reelmatch_widgets::escape_html;

/// Class shared by every statistic cell.
pub const STAT_CLASS: &str = "notification";
/// Default (winning) cell style.
pub const PRIMARY_CLASS: &str = "is-primary";
/// Losing cell style.
pub const LOSING_CLASS: &str = "is-warning";

/// OMDb's placeholder for absent fields.
const NOT_AVAILABLE: &str = "N/A";

fn poster_src(poster: &str) -> &str {
    if poster == NOT_AVAILABLE {
        ""
    } else {
        poster
    }
}

/// Dropdown entry: poster thumbnail, then `Title (Year)`.
#[must_use]
pub fn render_option(movie: &MovieSummary) -> String {
    format!(
        r#"<img src="{}" />{} ({})"#,
        escape_html(poster_src(&movie.poster)),
        escape_html(&movie.title),
        escape_html(&movie.year)
    )
}

/// The `data-value` text for a stat; empty when there is no value.
#[must_use]
pub fn data_value(stat: &Stat) -> String {
    stat.value.map(|v| v.to_string()).unwrap_or_default()
}

/// Summary card: media header followed by one cell per stat.
#[must_use]
pub fn movie_template(detail: &MovieDetail) -> String {
    let mut html = format!(
        r#"<article class="media">
  <figure class="media-left">
    <p class="image"><img src="{poster}" /></p>
  </figure>
  <div class="media-content">
    <div class="content">
      <h1>{title}</h1>
      <h4>{genre}</h4>
      <p>{plot}</p>
    </div>
  </div>
</article>
"#,
        poster = escape_html(poster_src(&detail.poster)),
        title = escape_html(&detail.title),
        genre = escape_html(&detail.genre),
        plot = escape_html(&detail.plot),
    );

    for stat in movie_stats(detail) {
        html.push_str(&format!(
            r#"<article data-value="{value}" class="{STAT_CLASS} {PRIMARY_CLASS}">
  <p class="title">{display}</p>
  <p class="subtitle">{label}</p>
</article>
"#,
            value = data_value(&stat),
            display = escape_html(&stat.display),
            label = stat.kind.label(),
        ));
    }
    html
}
