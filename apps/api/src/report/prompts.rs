// All LLM prompt templates for the report module. The two templates share
// one model but nothing else; prompts stay in Bahasa Indonesia because the
// rubrics and the produced narratives are Indonesian.

/// Fixed retrieval query used to pull the rubric rows that list the
/// evaluation aspects.
pub const CRITERIA_QUERY: &str = "Sebutkan semua aspek penilaian yang ada di tabel.";

/// System prompt for criteria extraction. List output only.
pub const CRITERIA_SYSTEM: &str = "Anda adalah asisten yang menganalisis dokumen rubrik \
    penilaian sekolah. Jawab hanya dengan daftar yang diminta, \
    tanpa teks pembuka atau penutup.";

/// Criteria extraction prompt template. Replace `{context}` before sending.
pub const CRITERIA_PROMPT_TEMPLATE: &str = r#"Analisis dokumen rubrik berikut.
Temukan daftar JUDUL ASPEK PENILAIAN utama (biasanya ada nomor 1, 2, 3 atau dicetak tebal di kolom aspek).
Contoh aspek: "Kehadiran", "Keterlibatan", "Pemahaman Tools". Tapi jangan mengulang judul yang sudah ditemukan.

<context>
{context}
</context>

Tugasmu: Hanya keluarkan daftar judul aspek dipisahkan dengan koma (,).
Jangan ada teks pembuka/penutup.
Jangan mengulang judul yang sudah ditulis.
Contoh Output: Kehadiran, Keterlibatan, Kreativitas"#;

/// System prompt for narrative generation.
pub const NARRATIVE_SYSTEM: &str = "Anda adalah Wali Kelas profesional yang menulis \
    narasi deskripsi rapot yang personal untuk orang tua siswa.";

/// Narrative prompt template. Replace `{context}` (retrieved rubric chunks)
/// and `{input}` (the student data block) before sending.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = r#"Anda adalah Wali Kelas profesional. Tugas Anda adalah membuat **Narasi Deskripsi Rapot** yang personal untuk orang tua.

Gunakan referensi RUBRIK berikut untuk menerjemahkan skor angka (1-4) menjadi kalimat deskriptif yang tepat:
<rubrik>
{context}
</rubrik>

Data Siswa:
{input}

Instruksi Penulisan:
1. Buka dengan sapaan hormat kepada Orang Tua [Nama Siswa].
2. Paragraf 1: Jelaskan KEKUATAN siswa (aspek dengan skor 3 atau 4). Gabungkan deskripsi dari rubrik dengan kalimat yang mengapresiasi.
3. Paragraf 2: Jelaskan AREA PENGEMBANGAN (aspek dengan skor 1 atau 2). Gunakan bahasa yang "sandwich" (positif-korektif-positif) dan tidak menghakimi. Berikan saran konkret berdasarkan kolom "NextStep" atau "Saran" di rubrik jika ada.
4. Tutup dengan kalimat motivasi dan harapan.
5. Gaya bahasa: Hangat, Profesional, Bahasa Indonesia Baku tapi bukan robot."#;
