//! HTML pages. Every interpolated value goes through [`escape`].

use crate::{
    apa::types::{Division, DivisionRef, DivisionWeek, Match, Player, Team},
    cli::types::Week,
};


const LAYOUT: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TITLE__ | APA Stats</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 0; color: #1f2328; background: #f6f8fa; }
    header { background: #0b3d91; padding: 0.75rem 1.5rem; }
    header a { color: #fff; text-decoration: none; font-weight: 600; }
    main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
    table { border-collapse: collapse; width: 100%; background: #fff; }
    th, td { border: 1px solid #d0d7de; padding: 0.4rem 0.6rem; text-align: left; }
    th { background: #eaeef2; }
    td.num, th.num { text-align: right; }
    .muted { color: #57606a; }
    .error { border-left: 4px solid #cf222e; background: #fff; padding: 1rem; }
    form { background: #fff; padding: 1rem; margin-bottom: 1rem; border: 1px solid #d0d7de; }
    nav.pager a { margin-right: 1rem; }
  </style>
</head>
<body>
  <header><a href="/">APA Stats</a></header>
  <main>
__BODY__
  </main>
</body>
</html>
"##;

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` (already HTML) in the site layout.
pub fn layout(title: &str, body: &str) -> String {
    let (head, tail) = LAYOUT.split_once("__BODY__").unwrap_or((LAYOUT, ""));
    let head = head.replace("__TITLE__", &escape(title));
    let mut html = String::with_capacity(head.len() + body.len() + tail.len());
    html.push_str(&head);
    html.push_str(body);
    html.push_str(tail);
    html
}

fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v))
}

fn opt(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), escape)
}

fn skill(level: Option<u8>) -> String {
    level.map_or_else(|| "-".to_string(), |l| l.to_string())
}

fn division_link(division: &DivisionRef) -> String {
    format!(
        r#"<a href="/divisions/{}">{}</a>"#,
        division.id,
        escape(&division.name)
    )
}

pub fn index_page() -> String {
    let body = r#"<h1>APA League Stats</h1>
<p class="muted">Look up standings, weekly results, team rosters, and player records.</p>
<form action="/lookup" method="get">
  <h2>Division</h2>
  <label>Division ID <input name="division" inputmode="numeric" required></label>
  <label>Week <input name="week" inputmode="numeric" placeholder="optional"></label>
  <button type="submit">View division</button>
</form>
<form action="/lookup" method="get">
  <h2>Team</h2>
  <label>Team ID <input name="team" inputmode="numeric" required></label>
  <button type="submit">View team</button>
</form>
<form action="/lookup" method="get">
  <h2>Player</h2>
  <label>Player ID <input name="player" inputmode="numeric" required></label>
  <button type="submit">View player</button>
</form>
"#;
    layout("Home", body)
}

pub fn division_page(division: &Division) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&division.name));

    let mut subtitle = Vec::new();
    if let Some(number) = &division.number {
        subtitle.push(format!("Division {}", escape(number)));
    }
    if let Some(session) = &division.session {
        match session.year {
            Some(year) => subtitle.push(format!("{} {}", escape(&session.name), year)),
            None => subtitle.push(escape(&session.name)),
        }
    }
    if !subtitle.is_empty() {
        body.push_str(&format!("<p class=\"muted\">{}</p>\n", subtitle.join(" &middot; ")));
    }

    body.push_str(&format!(
        "<p><a href=\"/divisions/{}/weeks/1\">Weekly results</a></p>\n",
        division.id
    ));

    if division.teams.is_empty() {
        body.push_str("<p>No teams in this division yet.</p>\n");
        return layout(&division.name, &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th class=\"num\">#</th><th>Team</th><th class=\"num\">W</th>\
         <th class=\"num\">L</th><th class=\"num\">Win %</th><th class=\"num\">Points</th></tr></thead>\n<tbody>\n",
    );
    for (rank, team) in division.standings().into_iter().enumerate() {
        body.push_str(&format!(
            "<tr><td class=\"num\">{}</td><td><a href=\"/teams/{}\">{}</a></td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            rank + 1,
            team.id,
            escape(&team.name),
            team.wins,
            team.losses,
            pct(team.win_percentage()),
            team.points,
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout(&division.name, &body)
}

fn match_row(m: &Match) -> String {
    let score = |points: Option<u32>| points.map_or_else(|| "-".to_string(), |p| p.to_string());
    let winner = m
        .winner()
        .map_or_else(|| "-".to_string(), |t| escape(&t.name));
    format!(
        "<tr><td><a href=\"/teams/{}\">{}</a></td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
         <td><a href=\"/teams/{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
        m.home_team.id,
        escape(&m.home_team.name),
        score(m.home_points),
        score(m.away_points),
        m.away_team.id,
        escape(&m.away_team.name),
        winner,
        opt(m.status.as_deref()),
    )
}

pub fn division_week_page(division: &DivisionWeek, week: Week) -> String {
    let title = format!("{} - Week {}", division.name, week);
    let mut body = format!(
        "<h1>{}</h1>\n<p><a href=\"/divisions/{}\">Standings</a></p>\n",
        escape(&title),
        division.id
    );

    body.push_str("<nav class=\"pager\">");
    if let Some(previous) = week.previous() {
        body.push_str(&format!(
            "<a href=\"/divisions/{}/weeks/{}\">&larr; Week {}</a>",
            division.id, previous, previous
        ));
    }
    body.push_str(&format!(
        "<a href=\"/divisions/{}/weeks/{}\">Week {} &rarr;</a></nav>\n",
        division.id,
        week.next(),
        week.next()
    ));

    let schedule = match &division.schedule {
        Some(schedule) if !schedule.matches.is_empty() => schedule,
        _ => {
            body.push_str("<p>No matches scheduled for this week.</p>\n");
            return layout(&title, &body);
        }
    };

    if let Some(date) = &schedule.date {
        body.push_str(&format!("<p class=\"muted\">Played {}</p>\n", escape(date)));
    }

    body.push_str(
        "<table>\n<thead><tr><th>Home</th><th class=\"num\">Pts</th><th class=\"num\">Pts</th>\
         <th>Away</th><th>Winner</th><th>Status</th></tr></thead>\n<tbody>\n",
    );
    for m in &schedule.matches {
        body.push_str(&match_row(m));
    }
    body.push_str("</tbody>\n</table>\n");

    layout(&title, &body)
}

pub fn team_page(team: &Team) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&team.name));
    if let Some(number) = &team.number {
        body.push_str(&format!("<p class=\"muted\">Team {}</p>\n", escape(number)));
    }
    if let Some(division) = &team.division {
        body.push_str(&format!("<p>Division: {}</p>\n", division_link(division)));
    }

    if team.roster.is_empty() {
        body.push_str("<p>No players on this roster.</p>\n");
        return layout(&team.name, &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Player</th><th class=\"num\">SL</th><th class=\"num\">W</th>\
         <th class=\"num\">L</th><th class=\"num\">Played</th><th class=\"num\">Win %</th></tr></thead>\n<tbody>\n",
    );
    for player in &team.roster {
        body.push_str(&format!(
            "<tr><td><a href=\"/players/{}\">{}</a></td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            player.id,
            escape(&player.display_name),
            skill(player.skill_level),
            player.matches_won,
            player.matches_lost(),
            player.matches_played,
            pct(player.win_percentage()),
        ));
    }
    body.push_str(&format!(
        "</tbody>\n<tfoot><tr><th>Team total</th><th></th><th class=\"num\">{}</th><th class=\"num\">{}</th>\
         <th class=\"num\">{}</th><th></th></tr></tfoot>\n</table>\n",
        team.total_matches_won(),
        team.total_matches_lost(),
        team.total_matches_played(),
    ));

    layout(&team.name, &body)
}

pub fn player_page(player: &Player) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&player.display_name));

    let mut details = Vec::new();
    if let Some(member) = &player.member_number {
        details.push(format!("Member #{}", escape(member)));
    }
    if let Some(location) = player.location() {
        details.push(escape(&location));
    }
    if !details.is_empty() {
        body.push_str(&format!("<p class=\"muted\">{}</p>\n", details.join(" &middot; ")));
    }

    if player.teams.is_empty() {
        body.push_str("<p>This player is not on any active team.</p>\n");
        return layout(&player.display_name, &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Team</th><th>Division</th><th class=\"num\">SL</th><th class=\"num\">W</th>\
         <th class=\"num\">L</th><th class=\"num\">Win %</th></tr></thead>\n<tbody>\n",
    );
    for team in &player.teams {
        let division = team
            .division
            .as_ref()
            .map_or_else(|| "-".to_string(), division_link);
        body.push_str(&format!(
            "<tr><td><a href=\"/teams/{}\">{}</a></td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            team.id,
            escape(&team.name),
            division,
            skill(team.skill_level),
            team.matches_won,
            team.matches_lost(),
            pct(team.win_percentage()),
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    layout(&player.display_name, &body)
}

pub fn error_page(status: u16, title: &str, message: &str) -> String {
    let body = format!(
        "<div class=\"error\">\n<h1>{} {}</h1>\n<p>{}</p>\n</div>\n<p><a href=\"/\">Back to search</a></p>\n",
        status,
        escape(title),
        escape(message)
    );
    layout(title, &body)
}
