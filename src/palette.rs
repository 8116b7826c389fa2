#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub id: &'static str,
}

pub const SECTIONS: [Section; 4] = [
    Section { name: "About", id: "about" },
    Section { name: "Experience", id: "experience" },
    Section { name: "Projects", id: "projects" },
    Section { name: "Contact", id: "contact" },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: String,
    pub id: &'static str,
}

impl PaletteEntry {
    pub fn from_section(section: &Section) -> Self {
        Self {
            label: section.name.to_string(),
            id: section.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteEvent {
    Open,
    Escape,
    Input(String),
    ArrowDown,
    ArrowUp,
    Enter,
    ClickRow(usize),
    ClickBackdrop,
}

impl PaletteEvent {
    /// Maps a keydown to a palette event. Ctrl+K and Cmd+K open the palette.
    pub fn from_key(key: &str, ctrl: bool, meta: bool) -> Option<Self> {
        if (ctrl || meta) && key.eq_ignore_ascii_case("k") {
            return Some(Self::Open);
        }

        match key {
            "Escape" => Some(Self::Escape),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteEffect {
    Ignored,
    Updated,
    FocusInput,
    Closed,
    Navigate(&'static str),
}

impl PaletteEffect {
    pub fn consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteState {
    entries: Vec<PaletteEntry>,
    results: Vec<usize>,
    query: String,
    selected: usize,
    visible: bool,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new(SECTIONS.iter().map(PaletteEntry::from_section).collect())
    }
}

impl PaletteState {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        let results = (0..entries.len()).collect();
        Self {
            entries,
            results,
            query: String::new(),
            selected: 0,
            visible: false,
        }
    }

    /// Swaps display labels (e.g. after a language change) and re-runs the current filter.
    pub fn relabel(&mut self, entries: Vec<PaletteEntry>) {
        self.entries = entries;
        self.refilter();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> impl Iterator<Item = &PaletteEntry> + '_ {
        self.results.iter().map(move |&index| &self.entries[index])
    }

    pub fn selected_entry(&self) -> Option<&PaletteEntry> {
        self.results
            .get(self.selected)
            .map(|&index| &self.entries[index])
    }

    pub fn apply(&mut self, event: PaletteEvent) -> PaletteEffect {
        if !self.visible {
            return match event {
                PaletteEvent::Open => {
                    self.visible = true;
                    self.query.clear();
                    self.refilter();
                    PaletteEffect::FocusInput
                }
                _ => PaletteEffect::Ignored,
            };
        }

        match event {
            PaletteEvent::Open => PaletteEffect::FocusInput,
            PaletteEvent::Escape | PaletteEvent::ClickBackdrop => {
                self.close();
                PaletteEffect::Closed
            }
            PaletteEvent::Input(query) => {
                self.query = query;
                self.refilter();
                PaletteEffect::Updated
            }
            PaletteEvent::ArrowDown => {
                if self.results.is_empty() {
                    return PaletteEffect::Ignored;
                }
                self.selected = (self.selected + 1).min(self.results.len() - 1);
                PaletteEffect::Updated
            }
            PaletteEvent::ArrowUp => {
                if self.results.is_empty() {
                    return PaletteEffect::Ignored;
                }
                self.selected = self.selected.saturating_sub(1);
                PaletteEffect::Updated
            }
            PaletteEvent::Enter => self.navigate_to(self.selected),
            PaletteEvent::ClickRow(row) => self.navigate_to(row),
        }
    }

    fn navigate_to(&mut self, row: usize) -> PaletteEffect {
        let Some(id) = self.results.get(row).map(|&index| self.entries[index].id) else {
            return PaletteEffect::Ignored;
        };
        self.close();
        PaletteEffect::Navigate(id)
    }

    fn close(&mut self) {
        self.visible = false;
        self.query.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.results = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.label.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect();
        self.selected = 0;
    }
}
