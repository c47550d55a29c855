//! Shared fixtures: a headless page whose handlers append to one ordered log.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fos_fullscreen::{
    Callbacks, FullscreenConfig, FullscreenManager, HandlerRegistry, HeadlessPlatform, NodeId, Platform,
};

pub type Log = Rc<RefCell<Vec<String>>>;

/// `"{label} #{index}"`
pub fn at(label: &str, id: NodeId) -> String {
    format!("{label} #{}", id.index())
}

fn describe(id: Option<NodeId>) -> String {
    id.map_or_else(|| "none".to_string(), |id| format!("#{}", id.index()))
}

pub fn global_handlers(log: &Log) -> HandlerRegistry {
    let (enter, exit, change, error) = (log.clone(), log.clone(), log.clone(), log.clone());
    HandlerRegistry::new()
        .with_on_enter(move |el| enter.borrow_mut().push(format!("global enter {}", describe(el))))
        .with_on_exit(move || exit.borrow_mut().push("global exit".to_string()))
        .with_on_change(move |el| change.borrow_mut().push(format!("global change {}", describe(el))))
        .with_on_error(move |el, reason| {
            error
                .borrow_mut()
                .push(format!("global error #{} {}", el.index(), reason.reason()))
        })
}

pub fn scope(log: &Log, label: &'static str) -> Callbacks {
    let (enter, exit, error) = (log.clone(), log.clone(), log.clone());
    Callbacks::new()
        .on_enter(move |el| enter.borrow_mut().push(at(&format!("{label} enter"), el)))
        .on_exit(move || exit.borrow_mut().push(format!("{label} exit")))
        .on_error(move |reason| error.borrow_mut().push(format!("{label} error {}", reason.reason())))
}

pub struct Page {
    pub fs: FullscreenManager<HeadlessPlatform>,
    pub log: Log,
}

impl Page {
    pub fn new(platform: HeadlessPlatform) -> Self {
        Self::with_config(platform, FullscreenConfig::default())
    }

    pub fn with_config(platform: HeadlessPlatform, config: FullscreenConfig) -> Self {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let fs = FullscreenManager::with_config(platform, global_handlers(&log), config);
        Self { fs, log }
    }

    pub fn html(&self) -> NodeId {
        self.fs.platform().document_element()
    }

    pub fn body(&self) -> NodeId {
        self.fs.platform().document().body()
    }

    pub fn add(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.fs.platform_mut().add_element(parent, tag).unwrap()
    }

    /// A video whose metadata is already available
    pub fn add_loaded_video(&mut self, parent: NodeId) -> NodeId {
        let video = self.add_video(parent);
        self.fs.platform_mut().preload_metadata(video).unwrap();
        video
    }

    pub fn add_video(&mut self, parent: NodeId) -> NodeId {
        self.fs.platform_mut().add_video(parent, "clip.mp4").unwrap()
    }

    pub fn scope(&self, label: &'static str) -> Callbacks {
        scope(&self.log, label)
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.log.borrow().iter().filter(|e| e.as_str() == entry).count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}
