use comms::room::Room;

use super::Route;

#[derive(Debug, Clone)]
pub enum Action {
    /// List the rooms of the session user again
    LoadRooms,
    /// Open the join modal on the given room
    SelectRoom { room: Room },
    CloseJoinModal,
    /// Enter the room the join modal is open on
    SubmitJoin { password: String },
    DismissAlert,
    Navigate { route: Route },
    Exit,
}
