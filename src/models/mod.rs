pub mod note;
pub mod project;
pub mod task;
pub mod user;

pub use note::{Note, NoteInput};
pub use project::{AddMemberRequest, Project, ProjectInput, ProjectMember, UpdateMemberRoleRequest};
pub use task::{Attachment, SubTask, SubTaskInput, SubTaskPatch, Task, TaskInput, TaskPatch, TaskStatus};
pub use user::{Role, User};
