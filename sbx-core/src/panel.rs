//! Footer info panel: static sections and the collapsed/expanded state.

/// One of the footer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoSection {
    About,
    Source,
    Contact,
}

impl InfoSection {
    pub const ALL: [InfoSection; 3] = [InfoSection::About, InfoSection::Source, InfoSection::Contact];

    /// The `data-section` id used by the footer link.
    pub fn id(self) -> &'static str {
        match self {
            InfoSection::About => "about",
            InfoSection::Source => "source",
            InfoSection::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        InfoSection::ALL.into_iter().find(|s| s.id() == id.trim())
    }

    /// Footer link text.
    pub fn link_text(self) -> &'static str {
        match self {
            InfoSection::About => "About",
            InfoSection::Source => "Data",
            InfoSection::Contact => "Legal Notice",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            InfoSection::About => "About Us",
            InfoSection::Source => "Data",
            InfoSection::Contact => "Legal Notice",
        }
    }

    /// HTML body of the section.
    pub fn html(self) -> &'static str {
        match self {
            InfoSection::About => ABOUT_HTML,
            InfoSection::Source => SOURCE_HTML,
            InfoSection::Contact => CONTACT_HTML,
        }
    }
}

const ABOUT_HTML: &str = r#"<div class="infoFlexContainer">
  <div class="infoText">
    <p>Hi there!</p>
    <p>This map visualizes environmental sensor data collected with a <a href="https://sensebox.de/de/products-mini.html" target="_blank">SenseBox Mini</a> during a group project in the Advanced GIS course at ETH Zürich.</p>
    <p>The SenseBox was mounted to a backpack while cycling through Höngg and Wipkingen in Zurich. Measurements were recorded every 5 seconds after a GPS fix was established. Since the bike was in motion, wind and terrain likely influenced the readings, and uphill areas have more points because climbing simply took longer.</p>
    <p>The measurements are compared with official public datasets to validate the results and provide additional context.</p>
  </div>
  <div class="infoImage">
    <img src="./Data/IMG_5526.jpg" alt="SenseBox on bike" />
  </div>
</div>"#;

const SOURCE_HTML: &str = r#"<p>The SenseBox Mini recorded temperature, humidity and particulate matter (PM1.0, PM2.5, PM4.0, PM10.0) concentrations every 5 seconds after a GPS satellite fix. The data was gathered on the 2nd of May from 10:00 to 11:00 AM.</p>
<p>
  Download the dataset:
  <a href="./Data/sensebox_with_differences.geojson" download="sensebox_data_hoengg.geojson">GeoJSON</a> |
  <a href="./Data/sensebox_with_differences_FILLED.csv" download="sensebox_data_hoengg.csv">CSV</a>
</p>
<p>Reference data sources:</p>
<ul>
  <li><a href="https://data.stadt-zuerich.ch/dataset/ugz_meteodaten_stundenmittelwerte" target="_blank">Stündlich aktualisierte Meteodaten, seit 1992</a> – City of Zurich Open Data</li>
</ul>"#;

const CONTACT_HTML: &str = r#"All content on this website, including visualizations, code, and data (excluding third-party data), is dedicated to the public domain under the <a href="https://creativecommons.org/publicdomain/zero/1.0/" target="_blank" rel="noopener noreferrer">Creative Commons CC0 1.0 Universal Public Domain Dedication</a>. You are free to copy, modify, distribute, and use the materials, even for commercial purposes, without asking for permission. Please note that external datasets used in this application may be subject to their own licenses."#;

/// Collapsed until a footer link is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded(InfoSection),
}

impl PanelState {
    /// Footer link click. Unknown section ids leave the state untouched.
    pub fn open(self, section_id: &str) -> Self {
        match InfoSection::from_id(section_id) {
            Some(section) => PanelState::Expanded(section),
            None => self,
        }
    }

    pub fn collapse(self) -> Self {
        PanelState::Collapsed
    }

    pub fn is_expanded(self) -> bool {
        matches!(self, PanelState::Expanded(_))
    }

    pub fn section(self) -> Option<InfoSection> {
        match self {
            PanelState::Expanded(section) => Some(section),
            PanelState::Collapsed => None,
        }
    }

    /// CSS classes toggled on the map view, panel, legend and collapse button.
    pub fn layout_classes(self) -> LayoutClasses {
        let on = self.is_expanded();
        LayoutClasses {
            view: if on { "half-size" } else { "" },
            panel: if on { "show" } else { "" },
            legend: if on { "move-up" } else { "" },
            collapse_button: if on { "rotated" } else { "" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutClasses {
    pub view: &'static str,
    pub panel: &'static str,
    pub legend: &'static str,
    pub collapse_button: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_collapsed() {
        let state = PanelState::default();
        assert!(!state.is_expanded());
        assert_eq!(state.layout_classes().panel, "");
    }

    #[test]
    fn footer_link_expands() {
        let state = PanelState::default().open("source");
        assert_eq!(state, PanelState::Expanded(InfoSection::Source));
        assert_eq!(state.section().map(InfoSection::title), Some("Data"));
        let classes = state.layout_classes();
        assert_eq!(classes.view, "half-size");
        assert_eq!(classes.panel, "show");
        assert_eq!(classes.legend, "move-up");
        assert_eq!(classes.collapse_button, "rotated");
    }

    #[test]
    fn switching_sections_stays_expanded() {
        let state = PanelState::default().open("about").open("contact");
        assert_eq!(state, PanelState::Expanded(InfoSection::Contact));
    }

    #[test]
    fn unknown_section_is_ignored() {
        assert_eq!(PanelState::default().open("imprint"), PanelState::Collapsed);
        let expanded = PanelState::Expanded(InfoSection::About);
        assert_eq!(expanded.open(""), expanded);
    }

    #[test]
    fn collapse_button() {
        let state = PanelState::Expanded(InfoSection::About).collapse();
        assert_eq!(state, PanelState::Collapsed);
        assert_eq!(state.collapse(), PanelState::Collapsed);
    }
}
