//! Named commands understood by the device's two request endpoints

/// The two logical endpoints a command can be addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Control,
    Browse,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Control => "control",
            Endpoint::Browse => "browse",
        }
    }
}

/// A single request: a method name plus its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub endpoint: Endpoint,
    pub method: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl Command {
    fn control(method: &'static str) -> Self {
        Self {
            endpoint: Endpoint::Control,
            method,
            params: Vec::new(),
        }
    }

    fn browse(method: &'static str) -> Self {
        Self {
            endpoint: Endpoint::Browse,
            method,
            params: Vec::new(),
        }
    }

    fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn get_volume() -> Self {
        Self::control("get-volume")
    }

    pub fn set_volume(value: u16) -> Self {
        Self::control("set-volume").with("value", value)
    }

    pub fn get_position_info() -> Self {
        Self::control("get-position-info")
    }

    pub fn get_transport_info() -> Self {
        Self::control("get-transport-info")
    }

    /// Jump to a queue entry. `track_number` is the device's 1-based position.
    pub fn seek_track(track_number: u32) -> Self {
        Self::control("seek")
            .with("unit", "TRACK_NR")
            .with("target", track_number)
    }

    /// Remove a queue entry. `track_number` is the device's 1-based position.
    pub fn remove_track_from_queue(track_number: u32) -> Self {
        Self::control("remove-track-from-queue").with("track", track_number)
    }

    pub fn play() -> Self {
        Self::control("play")
    }

    pub fn pause() -> Self {
        Self::control("pause")
    }

    pub fn stop() -> Self {
        Self::control("stop")
    }

    pub fn next() -> Self {
        Self::control("next")
    }

    pub fn previous() -> Self {
        Self::control("previous")
    }

    pub fn get_queue_contents() -> Self {
        Self::browse("get-queue-contents")
    }

    pub fn get_all_genres() -> Self {
        Self::browse("get-all-genres")
    }

    pub fn get_direct_children(root: &str) -> Self {
        Self::browse("get-direct-children").with("root", root)
    }

    /// Look up a parameter by name.
    #[cfg(test)]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Form fields as posted: `method` first, then the parameters.
    pub fn form(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(self.params.len() + 1);
        fields.push(("method", self.method.to_string()));
        fields.extend(self.params.iter().cloned());
        fields
    }
}
