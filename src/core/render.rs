use crate::domain::model::{Count, FormattedObservation, RegionResult};

const EMPTY_REGION_PLACEHOLDER: &str = "<p>No notable sightings in the past week.</p>";

/// Page shell with inline stylesheet; `{{last_updated}}` and `{{regions}}` are
/// substituted at render time. Token replacement rather than `format!` keeps
/// the CSS braces out of the format machinery.
const PAGE_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>eBird Notable Sightings</title>
    <style>
        :root {
            --primary: #2e7d32;
            --primary-light: #4caf50;
            --bg: #f5f5f5;
            --card-bg: #ffffff;
            --text: #333333;
            --text-light: #666666;
            --border: #e0e0e0;
        }

        * {
            box-sizing: border-box;
            margin: 0;
            padding: 0;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.6;
            padding: 20px;
        }

        .container {
            max-width: 900px;
            margin: 0 auto;
        }

        header {
            text-align: center;
            padding: 30px 0;
            border-bottom: 2px solid var(--primary);
            margin-bottom: 30px;
        }

        h1 {
            color: var(--primary);
            font-size: 2rem;
            margin-bottom: 10px;
        }

        .last-updated {
            color: var(--text-light);
            font-size: 0.9rem;
        }

        .region {
            margin-bottom: 40px;
        }

        .region h2 {
            color: var(--primary);
            border-bottom: 1px solid var(--border);
            padding-bottom: 10px;
            margin-bottom: 20px;
        }

        .observation {
            background: var(--card-bg);
            border-radius: 8px;
            padding: 15px 20px;
            margin-bottom: 15px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            border-left: 4px solid var(--primary-light);
        }

        .species-name {
            font-size: 1.2rem;
            font-weight: 600;
            color: var(--primary);
        }

        .species-name a {
            color: inherit;
            text-decoration: none;
        }

        .species-name a:hover {
            text-decoration: underline;
        }

        .species-scientific {
            font-style: italic;
            color: var(--text-light);
            font-size: 0.9rem;
            margin-bottom: 8px;
        }

        .details {
            margin: 8px 0;
        }

        .count {
            font-weight: 600;
            background: var(--primary-light);
            color: white;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.85rem;
        }

        .location {
            color: var(--text);
        }

        .meta {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-top: 10px;
            font-size: 0.85rem;
            color: var(--text-light);
        }

        .meta a {
            color: var(--primary);
            text-decoration: none;
        }

        .meta a:hover {
            text-decoration: underline;
        }

        footer {
            text-align: center;
            padding: 30px 0;
            color: var(--text-light);
            font-size: 0.85rem;
            border-top: 1px solid var(--border);
            margin-top: 40px;
        }

        footer a {
            color: var(--primary);
        }

        @media (max-width: 600px) {
            body {
                padding: 10px;
            }

            h1 {
                font-size: 1.5rem;
            }

            .observation {
                padding: 12px 15px;
            }
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Notable Bird Sightings</h1>
            <p class="last-updated">Last updated: {{last_updated}}</p>
        </header>

        <main>
{{regions}}
        </main>

        <footer>
            <p>Data from <a href="https://ebird.org" target="_blank">eBird</a> |
            Updated automatically via GitHub Actions</p>
        </footer>
    </div>
</body>
</html>
"#;

/// Minimal HTML escaping for text nodes and attribute values. Observation
/// fields come from third-party submissions, so everything derived from them
/// goes through here before interpolation.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_observation(obs: &FormattedObservation) -> String {
    let count = match obs.count {
        Count::Known(n) => n.to_string(),
        Count::Unknown => "present".to_string(),
    };

    let species = escape_html(&obs.species);
    let species_html = match &obs.species_url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank">{}</a>"#,
            escape_html(url),
            species
        ),
        None => species,
    };

    let checklist_html = match &obs.checklist_url {
        Some(url) => format!(
            r#"<a href="{}" target="_blank">View checklist</a>"#,
            escape_html(url)
        ),
        None => String::new(),
    };

    format!(
        r#"                <div class="observation">
                    <div class="species-name">{species_html}</div>
                    <div class="species-scientific">{scientific}</div>
                    <div class="details">
                        <span class="count">{count}</span> at
                        <span class="location">{location}</span>
                    </div>
                    <div class="meta">
                        <span class="date">{date}</span>
                        {checklist_html}
                    </div>
                </div>
"#,
        scientific = escape_html(&obs.scientific_name),
        location = escape_html(&obs.location),
        date = escape_html(&obs.date),
    )
}

fn render_region(region: &RegionResult) -> String {
    let observations_html = if region.observations.is_empty() {
        EMPTY_REGION_PLACEHOLDER.to_string()
    } else {
        region
            .observations
            .iter()
            .map(render_observation)
            .collect::<String>()
    };

    format!(
        r#"        <section class="region">
            <h2>{name}</h2>
            <div class="observations">
                {observations_html}
            </div>
        </section>
"#,
        name = escape_html(&region.name),
    )
}

/// Builds the complete self-contained page. Regions render in the order they
/// appear in `regions`, which matches the configured region order.
pub fn render_page(regions: &[RegionResult], last_updated: &str) -> String {
    let regions_html: String = regions.iter().map(render_region).collect();

    PAGE_SHELL
        .replace("{{last_updated}}", &escape_html(last_updated))
        .replace("{{regions}}", &regions_html)
}
