//! Static page shell and per-tab control panels.
//!
//! Control elements carry a `data-control` attribute naming the query
//! parameter they feed; output containers carry the ids that render
//! sections target.

use crate::models::{FilterOptions, OptionList, Period, Tab};
use crate::readers::PageAssets;
use crate::utils::constants::{
    AGB_ATTRIBUTES, AGB_CATEGORIES, BGB_ATTRIBUTES, BGB_CATEGORIES, DASHBOARD_TITLE,
    LUX_THEME_URL, PLOTLY_JS_URL,
};

const DASHBOARD_JS: &str = include_str!("dashboard.js");

const PAGE_CSS: &str = r#"
.tabs-container { display: flex; gap: 4px; border-bottom: 1px solid #ddd; }
.tabs-container button { border: 1px solid #ddd; border-bottom: none; background: #f9f9f9; padding: 10px 20px; cursor: pointer; }
.tabs-container button.active { background: #fff; border-top: 2px solid #007BFF; }
.summary-boxes { margin-bottom: 20px; }
.summary-box { border: 1px solid #ddd; padding: 15px; width: 30%; display: inline-block; text-align: center; }
.summary-value { font-size: 24px; }
.control { margin-bottom: 10px; }
"#;

struct Dropdown<'a> {
    id: &'a str,
    control: &'a str,
    label: &'a str,
    options: &'a OptionList,
    selected: Option<&'a str>,
    style: &'a str,
}

impl Dropdown<'_> {
    fn render(&self) -> String {
        let mut options = String::new();
        if self.selected.is_none() {
            options.push_str(r#"<option value="" selected>Select...</option>"#);
        }
        for entry in self.options.entries() {
            let selected = if self.selected == Some(entry.value.as_str()) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&entry.value),
                selected,
                escape_html(&entry.label)
            ));
        }

        format!(
            r#"<div class="control" style="{style}"><label for="{id}">{label}</label><select class="form-control" id="{id}" data-control="{control}">{options}</select></div>"#,
            style = self.style,
            id = self.id,
            label = escape_html(self.label),
            control = self.control,
            options = options,
        )
    }
}

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Full page: header with logos and title, tab selector, empty content panel
pub fn render_shell(assets: &PageAssets, initial: Tab) -> String {
    let logos: String = assets
        .logos
        .iter()
        .map(|uri| format!(r#"<img src="{}" style="height: 40px" alt="logo">"#, uri))
        .collect();

    let tabs: String = Tab::ALL
        .iter()
        .map(|tab| {
            format!(
                r#"<button type="button" data-tab="{}">{}</button>"#,
                tab.slug(),
                escape_html(tab.label())
            )
        })
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="{theme}">
<script src="{plotly}"></script>
<style>{css}</style>
</head>
<body data-initial-tab="{initial}">
<div style="margin: 20px">
  <nav>
    <div class="navbar">
      <div style="margin-bottom: 20px">
        <div style="display: inline-block">{logos}</div>
        <div style="display: inline-block; margin-left: 20px"><h2 style="color: #333">{title}</h2></div>
      </div>
      <div class="tabs-container">{tabs}</div>
    </div>
  </nav>
  <div id="tabs-content" style="padding: 20px"></div>
</div>
<script>
{script}
</script>
</body>
</html>"##,
        title = escape_html(DASHBOARD_TITLE),
        theme = LUX_THEME_URL,
        plotly = PLOTLY_JS_URL,
        css = PAGE_CSS,
        initial = initial.slug(),
        logos = logos,
        tabs = tabs,
        script = DASHBOARD_JS,
    )
}

/// Control panel and output containers for one tab
pub fn render_panel(tab: Tab, options: &FilterOptions) -> String {
    let body = match tab {
        Tab::Ghg => ghg_panel(options),
        Tab::Weather => weather_panel(),
        Tab::Agb => agb_panel(options),
        Tab::Bgb => bgb_panel(),
    };
    format!(
        r#"<div><h3 style="text-align: center">{}</h3>{}</div>"#,
        escape_html(tab.heading()),
        body
    )
}

fn ghg_panel(options: &FilterOptions) -> String {
    let third = "width: 32%; display: inline-block";
    let filters = [
        Dropdown {
            id: "site-dropdown",
            control: "site",
            label: "Select Site:",
            options: &options.ghg_sites,
            selected: Some("All"),
            style: third,
        },
        Dropdown {
            id: "treatment-dropdown",
            control: "treatment",
            label: "Select Treatment:",
            options: &options.ghg_treatments,
            selected: Some("All"),
            style: third,
        },
        Dropdown {
            id: "type-dropdown",
            control: "type",
            label: "Select Type:",
            options: &options.ghg_types,
            selected: Some("All"),
            style: third,
        },
    ]
    .iter()
    .map(Dropdown::render)
    .collect::<String>();

    let periods = OptionList::from_periods(&Period::GHG_CHOICES);
    let co2 = Dropdown {
        id: "co2-distribution-dropdown",
        control: "co2_period",
        label: "CO2 Data Distribution:",
        options: &periods,
        selected: Some(Period::Daily.code()),
        style: "",
    };
    let ch4 = Dropdown {
        id: "ch4-distribution-dropdown",
        control: "ch4_period",
        label: "CH4 Data Distribution:",
        options: &periods,
        selected: Some(Period::Daily.code()),
        style: "",
    };

    format!(
        r#"<div style="margin-bottom: 20px">{}</div><div style="margin-bottom: 40px">{}<div id="co2-graph"></div></div><div>{}<div id="ch4-graph"></div></div>"#,
        filters,
        co2.render(),
        ch4.render()
    )
}

fn weather_panel() -> String {
    let periods = OptionList::from_periods(&Period::WEATHER_CHOICES);
    let period = Dropdown {
        id: "aws-distribution-dropdown",
        control: "period",
        label: "Select Data Distribution:",
        options: &periods,
        selected: Some(Period::Daily.code()),
        style: "",
    };
    format!(r#"{}<div id="aws-graphs"></div>"#, period.render())
}

fn agb_panel(options: &FilterOptions) -> String {
    let attributes = OptionList::from_static(AGB_ATTRIBUTES);
    let categories = OptionList::from_static(AGB_CATEGORIES);
    let controls = [
        Dropdown {
            id: "agb-region-dropdown",
            control: "region",
            label: "Select Region:",
            options: &options.agb_regions,
            selected: None,
            style: "",
        },
        Dropdown {
            id: "agb-site-dropdown",
            control: "site",
            label: "Select Site:",
            options: &options.agb_sites,
            selected: None,
            style: "",
        },
        Dropdown {
            id: "agb-attribute-dropdown",
            control: "attribute",
            label: "Select Attribute:",
            options: &attributes,
            selected: Some(AGB_ATTRIBUTES[0]),
            style: "",
        },
        Dropdown {
            id: "agb-category-dropdown",
            control: "category",
            label: "Select Category:",
            options: &categories,
            selected: Some(AGB_CATEGORIES[0]),
            style: "",
        },
    ]
    .iter()
    .map(Dropdown::render)
    .collect::<String>();

    format!(r#"{}<div id="agb-boxplot"></div>"#, controls)
}

fn bgb_panel() -> String {
    let attributes = OptionList::from_static(BGB_ATTRIBUTES);
    let categories = OptionList::from_static(BGB_CATEGORIES);
    let controls = [
        Dropdown {
            id: "bgb-attribute-dropdown",
            control: "attribute",
            label: "Select Attribute:",
            options: &attributes,
            selected: Some(BGB_ATTRIBUTES[0]),
            style: "",
        },
        Dropdown {
            id: "bgb-category-dropdown",
            control: "category",
            label: "Select Category:",
            options: &categories,
            selected: Some(BGB_CATEGORIES[0]),
            style: "",
        },
    ]
    .iter()
    .map(Dropdown::render)
    .collect::<String>();

    format!(r#"{}<div id="bgb-boxplot"></div>"#, controls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionEntry;

    fn options() -> FilterOptions {
        FilterOptions {
            ghg_sites: OptionList::from_static(&["A", "B<1>"]).with_all(),
            ghg_treatments: OptionList::from_static(&["X"]).with_all(),
            ghg_types: OptionList::from_static(&["Y"]).with_all(),
            agb_regions: OptionList::new(vec![OptionEntry::same("R1")]),
            agb_sites: OptionList::new(vec![OptionEntry::same("S1")]),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_shell_contains_logos_title_and_tabs() {
        let assets = PageAssets {
            logos: vec![
                "data:image/png;base64,AAA".into(),
                "data:image/png;base64,BBB".into(),
            ],
        };
        let html = render_shell(&assets, Tab::Ghg);

        assert!(html.contains("NCS Data Hub (Plug &amp; Play Version)"));
        assert!(html.contains(r#"src="data:image/png;base64,AAA""#));
        assert!(html.contains(r#"src="data:image/png;base64,BBB""#));
        for tab in Tab::ALL {
            assert!(html.contains(&format!(r#"data-tab="{}""#, tab.slug())));
        }
        assert!(html.contains(r#"data-initial-tab="tab-ghg""#));
        assert!(html.contains(r#"id="tabs-content""#));
        assert!(html.contains("Plotly.react"));
    }

    #[test]
    fn test_shell_script_drops_superseded_renders() {
        let html = render_shell(&PageAssets::default(), Tab::Weather);
        assert!(html.contains("latestRequest[tab] = request;"));
        assert!(html.contains("request !== latestRequest[tab]"));
    }

    #[test]
    fn test_ghg_panel_controls_and_targets() {
        let html = render_panel(Tab::Ghg, &options());

        for control in ["site", "treatment", "type", "co2_period", "ch4_period"] {
            assert!(html.contains(&format!(r#"data-control="{}""#, control)));
        }
        assert!(html.contains(r#"id="co2-graph""#));
        assert!(html.contains(r#"id="ch4-graph""#));
        assert!(html.contains(r#"<option value="All" selected>All</option>"#));
        assert!(html.contains(r#"<option value="2W">Biweekly</option>"#));
        assert!(html.contains("B&lt;1&gt;"));
        assert!(!html.contains("Hourly"));
    }

    #[test]
    fn test_weather_panel_offers_hourly() {
        let html = render_panel(Tab::Weather, &options());
        assert!(html.contains(r#"<option value="H">Hourly</option>"#));
        assert!(html.contains(r#"<option value="D" selected>Daily</option>"#));
        assert!(html.contains(r#"id="aws-graphs""#));
    }

    #[test]
    fn test_agb_panel_region_and_site_start_unset() {
        let html = render_panel(Tab::Agb, &options());
        assert_eq!(html.matches(r#"<option value="" selected>"#).count(), 2);
        assert!(html.contains(r#"<option value="dbh" selected>dbh</option>"#));
        assert!(html.contains(r#"<option value="Spp_Sci" selected>Spp_Sci</option>"#));
        assert!(!html.contains(r#"value="All""#));
    }

    #[test]
    fn test_bgb_panel_has_no_location_filters() {
        let html = render_panel(Tab::Bgb, &options());
        assert!(!html.contains(r#"data-control="region""#));
        assert!(html.contains(r#"<option value="Land cover">Land cover</option>"#));
        assert!(html.contains(r#"id="bgb-boxplot""#));
    }
}
