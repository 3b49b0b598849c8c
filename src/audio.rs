//! Sound effects for kitchen events.

use std::collections::HashMap;

use log::warn;
use web_sys::HtmlAudioElement;

use silog_kitchen::kitchen::events::KitchenEvent;

/// One `<audio>` element per sound file, created on first use.
pub struct Sounds {
    elements: HashMap<&'static str, HtmlAudioElement>,
}

impl Sounds {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Play every event in order. Muted playback drops them.
    pub fn play_all(&mut self, events: &[KitchenEvent], muted: bool) {
        if muted {
            return;
        }
        for event in events {
            self.play(*event);
        }
    }

    fn play(&mut self, event: KitchenEvent) {
        let path = event.sound_path();
        let audio = match self.element(path) {
            Some(a) => a,
            None => return,
        };
        audio.set_volume(event.volume());
        audio.set_current_time(0.0);
        // 自動再生ブロック等の失敗は Promise 側で起きるので、ここでは同期エラーのみ拾う
        if let Err(e) = audio.play() {
            warn!("Silog Kitchen: {path} を再生できません: {e:?}");
        }
    }

    fn element(&mut self, path: &'static str) -> Option<&HtmlAudioElement> {
        if !self.elements.contains_key(path) {
            match HtmlAudioElement::new_with_src(path) {
                Ok(audio) => {
                    self.elements.insert(path, audio);
                }
                Err(e) => {
                    warn!("Silog Kitchen: {path} を読み込めません: {e:?}");
                    return None;
                }
            }
        }
        self.elements.get(path)
    }
}
