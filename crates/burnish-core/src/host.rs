use std::io;

/// Notification sink. Hosts surface these messages however they like; the
/// extension never renders anything itself.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// View of the host workspace used by deferred tasks: which document is in
/// front of the user right now, its content, and the fold command.
pub trait Workspace {
    fn active_doc_id(&self) -> Option<String>;
    fn active_content(&self) -> Option<String>;
    fn fold_properties(&mut self);
}

/// The host's note store. Paths are host-relative strings; the extension
/// only inspects them, it never touches the filesystem directly.
pub trait NoteVault {
    fn exists(&self, path: &str) -> bool;
    fn create(&mut self, path: &str, data: &str) -> Result<(), io::Error>;
}

/// Modal confirmation supplied by the host. Returns whether the user agreed
/// to create the named note.
pub trait ConfirmPrompt {
    fn confirm_create(&mut self, file_name: &str) -> bool;
}

/// The three places the extension plugs into its host. Registration is an
/// explicit call per point, and teardown is an explicit unregister, so hosts
/// never need to patch or restore their own entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Edit events where the last inserted character was a space.
    SpaceTrigger,
    /// Note-creation calls routed through the guard middleware.
    CreationGuard,
    /// Active-document changes, for the properties fold.
    OpenListener,
}

pub trait HostHooks {
    fn register(&mut self, point: ExtensionPoint);
    fn unregister(&mut self, point: ExtensionPoint);
}
