//! Executes parsed commands against the manager.
use std::fmt::Write;

use crate::command::{ClientProperty, Command, FloatingArg, ToggleArg};
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::errors::{CoreError, Result};
use crate::hooks::HookEvent;
use crate::models::{Manager, SliceId, SplitAlign, TagId, WindowHandle};
use crate::state::State;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run one command. Human-readable answers (and error messages on the
    /// textual surface) land in `output`; dirty state is reconciled before
    /// returning to the caller.
    pub fn command_handler(&mut self, command: &Command, output: &mut String) -> Result<bool> {
        let result = process_internal(self, command, output);
        self.state.reconcile();
        result
    }

    /// The argv surface: parse, run, map errors to exit codes. Zero is
    /// success; errors also append their message to `output`.
    pub fn textual_command(&mut self, argv: &[&str], output: &mut String) -> i32 {
        match Command::parse(argv).and_then(|command| self.command_handler(&command, output)) {
            Ok(_) => 0,
            Err(err) => {
                let _ = writeln!(output, "{err}");
                err.exit_code()
            }
        }
    }
}

fn process_internal<C: Config, SERVER: DisplayServer>(
    manager: &mut Manager<C, SERVER>,
    command: &Command,
    output: &mut String,
) -> Result<bool> {
    match command {
        Command::Close { window } => close_window(&mut manager.state, window),
        Command::SetProperty { property, value } => {
            set_property(&mut manager.state, *property, *value)
        }
        Command::Raise { window } => raise(&mut manager.state, window),
        Command::JumpTo { window } => jump_to(&mut manager.state, window),
        Command::AddTag { name } => manager.add_tag(name).map(|_| false),
        Command::RenameTag { from, to } => rename_tag(&mut manager.state, from, to),
        Command::MergeTag { name, target } => {
            merge_tag(&mut manager.state, name, target.as_deref())
        }
        Command::MoveToTag { name } => move_to_tag(&mut manager.state, name),
        Command::Floating { tag, value } => {
            floating(&mut manager.state, tag.as_deref(), *value, output)
        }
        Command::Split { align, fraction } => split(manager, *align, *fraction),
        Command::Set { name, value } => set_setting(&mut manager.state, name, value),
    }
}

fn close_window(state: &mut State, spec: &str) -> Result<bool> {
    let Some((window, _)) = state.resolve_window(spec) else {
        return Err(CoreError::InvalidArgument(format!("no such window: {spec:?}")));
    };
    state.actions.push_back(DisplayAction::SendDelete(window));
    Ok(false)
}

fn set_property(state: &mut State, property: ClientProperty, value: ToggleArg) -> Result<bool> {
    let Some(handle) = state.current_client() else {
        // nothing to do
        return Ok(false);
    };
    match property {
        ClientProperty::Fullscreen => {
            let current = state.clients.get(&handle).is_some_and(|c| c.fullscreen);
            let next = value.apply(current);
            if next != current {
                state.set_fullscreen(handle, next);
            }
        }
        ClientProperty::Pseudotile => {
            let current = state.clients.get(&handle).is_some_and(|c| c.pseudotile);
            let next = value.apply(current);
            if next != current {
                state.set_pseudotile(handle, next);
            }
        }
    }
    Ok(true)
}

fn raise(state: &mut State, spec: &str) -> Result<bool> {
    let Some((window, client)) = state.resolve_window(spec) else {
        return Err(CoreError::InvalidArgument(format!("no such window: {spec:?}")));
    };
    if client.is_some() {
        state.raise_client(window);
    } else {
        state.actions.push_back(DisplayAction::RaiseWindow(window));
    }
    Ok(true)
}

fn jump_to(state: &mut State, spec: &str) -> Result<bool> {
    match state.resolve_window(spec) {
        Some((window, Some(_))) => {
            state.focus_client(window);
            Ok(true)
        }
        _ => Err(CoreError::InvalidArgument(format!("no such client: {spec:?}"))),
    }
}

fn rename_tag(state: &mut State, from: &str, to: &str) -> Result<bool> {
    if to.is_empty() {
        return Err(CoreError::InvalidArgument("empty tag name".to_owned()));
    }
    if state.tags.find_by_name(to).is_some() {
        return Err(CoreError::InvalidArgument(format!("tag {to:?} already exists")));
    }
    let Some(id) = state.tags.find_by_name(from).map(|t| t.id) else {
        return Err(CoreError::NotFound(format!("tag {from:?}")));
    };
    if let Some(tag) = state.tags.get_mut(id) {
        tag.name = to.to_owned();
    }
    state
        .hooks
        .push_back(HookEvent::TagRenamed { old: from.to_owned(), new: to.to_owned() });
    Ok(false)
}

fn merge_tag(state: &mut State, name: &str, target: Option<&str>) -> Result<bool> {
    let Some(tag_id) = state.tags.find_by_name(name).map(|t| t.id) else {
        return Err(CoreError::NotFound(format!("tag {name:?}")));
    };
    if state.monitor_showing_tag(tag_id).is_some() {
        return Err(CoreError::InvalidArgument(format!("tag {name:?} is viewed on a monitor")));
    }
    let target_id: TagId = match target {
        Some(target_name) => state
            .tags
            .find_by_name(target_name)
            .map(|t| t.id)
            .ok_or_else(|| CoreError::NotFound(format!("tag {target_name:?}")))?,
        None => state
            .current_tag()
            .ok_or_else(|| CoreError::NotFound("a target tag".to_owned()))?,
    };
    if target_id == tag_id {
        return Err(CoreError::InvalidArgument("cannot merge a tag into itself".to_owned()));
    }

    let clients = state
        .tags
        .get(tag_id)
        .map(|t| t.frame.clients())
        .unwrap_or_default();
    for handle in clients {
        state.move_client_to_tag(handle, target_id);
    }
    // retire the frame background windows along with the tag
    let leaves: Vec<(WindowHandle, SliceId)> = state
        .tags
        .get(tag_id)
        .map(|t| t.frame.leaves().iter().map(|l| (l.window, l.slice)).collect())
        .unwrap_or_default();
    for (window, slice) in leaves {
        if let Some(tag) = state.tags.get_mut(tag_id) {
            tag.stack.remove_slice(&state.slices, slice);
        }
        state.slices.destroy(slice);
        state.actions.push_back(DisplayAction::DestroyWindow(window));
    }
    let target_name = state.tags.get(target_id).map(|t| t.name.clone()).unwrap_or_default();
    state.tags.remove(tag_id);
    state
        .hooks
        .push_back(HookEvent::TagRemoved { tag: name.to_owned(), target: target_name });
    state.tag_flags_dirty = true;
    Ok(true)
}

fn move_to_tag(state: &mut State, name: &str) -> Result<bool> {
    let Some(target) = state.tags.find_by_name(name).map(|t| t.id) else {
        return Err(CoreError::NotFound(format!("tag {name:?}")));
    };
    let Some(handle) = state.current_client() else {
        return Ok(false);
    };
    state.move_client_to_tag(handle, target);
    Ok(true)
}

fn floating(
    state: &mut State,
    tag: Option<&str>,
    value: FloatingArg,
    output: &mut String,
) -> Result<bool> {
    let tag_id = match tag {
        Some(name) => state
            .tags
            .find_by_name(name)
            .map(|t| t.id)
            .ok_or_else(|| CoreError::NotFound(format!("tag {name:?}")))?,
        None => state
            .current_tag()
            .ok_or_else(|| CoreError::NotFound("a tag".to_owned()))?,
    };
    let current = state.tags.get(tag_id).is_some_and(|t| t.floating);
    match value {
        FloatingArg::Status => {
            let _ = write!(output, "{}", if current { "on" } else { "off" });
            Ok(false)
        }
        FloatingArg::Set(toggle) => {
            let next = toggle.apply(current);
            if next != current {
                if let Some(t) = state.tags.get_mut(tag_id) {
                    t.floating = next;
                }
                if let Some(monitor) = state.monitor_showing_tag(tag_id) {
                    state.monitor_apply_layout(monitor);
                }
            }
            Ok(true)
        }
    }
}

fn split<C: Config, SERVER: DisplayServer>(
    manager: &mut Manager<C, SERVER>,
    align: SplitAlign,
    fraction: f32,
) -> Result<bool> {
    let Some(tag_id) = manager.state.current_tag() else {
        return Err(CoreError::NotFound("a tag".to_owned()));
    };
    let window = manager.display_server.create_service_window();
    let state = &mut manager.state;
    let slice = state.slices.create_frame(window);
    let Some(tag) = state.tags.get_mut(tag_id) else {
        return Err(CoreError::NotFound("a tag".to_owned()));
    };
    tag.frame.split_focused(align, fraction, window, slice);
    tag.stack.insert_slice(&state.slices, slice);
    if let Some(monitor) = state.monitor_showing_tag(tag_id) {
        state.actions.push_back(DisplayAction::MapWindow(window));
        state.monitor_apply_layout(monitor);
    }
    Ok(true)
}

fn set_setting(state: &mut State, name: &str, value: &str) -> Result<bool> {
    let relayout = state.settings.set(name, value)?;
    if relayout {
        state.all_monitors_apply_layout();
    }
    Ok(relayout)
}
